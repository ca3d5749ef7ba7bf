mod local_subject;
pub use local_subject::*;
mod shared_subject;
pub use shared_subject::*;
