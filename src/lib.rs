//! Reactive value binding for main-context consumers.
//!
//! The crate is built around three pieces:
//!
//! - [`Driver`](driver::Driver): a shared, failure-free view of a stream
//!   that replays its latest value and delivers on the main context.
//! - [`ValueSubject`](value_subject::ValueSubject): a value cell that can be
//!   read, written, observed, and bridged to external state.
//! - Projections ([`LocalBehaviorExt`](value_subject::LocalBehaviorExt)):
//!   derived read-only and read-write views over a cell's value, linked by
//!   accessor pairs and kept consistent without update loops.

pub mod behavior;
pub mod driver;
pub mod main_observer;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod shared;
pub mod subject;
pub mod subscriber;
pub mod subscription;
pub mod type_hint;
pub mod value_subject;

pub use prelude::*;
