pub mod complete_on_error;
pub mod distinct_until_changed;
pub mod error_recover;
pub mod error_return;
pub mod map;
