pub use crate::behavior::Behavior;
pub use crate::driver::{Driver, DriverSubscription, IntoDriver};
pub use crate::main_observer::MainObserver;
pub use crate::observable::*;
pub use crate::observer::Observer;
pub use crate::ops::complete_on_error::{CompleteOnErrorObserver, CompleteOnErrorOp};
pub use crate::ops::distinct_until_changed::{
  DistinctUntilChangedObserver, DistinctUntilChangedOp,
};
pub use crate::ops::error_recover::{
  ErrorRecoverOp, LocalErrorRecoverObserver, SharedErrorRecoverObserver,
};
pub use crate::ops::error_return::{ErrorReturnObserver, ErrorReturnOp};
pub use crate::ops::map::{MapObserver, MapOp};
pub use crate::rc::{MutArc, MutRc, RcDeref, RcDerefMut};
pub use crate::scheduler::{
  InlineScheduler, MainHandle, MainLoop, MainScheduler, MainTask,
};
pub use crate::shared::{IntoShared, Shared};
pub use crate::subject::*;
pub use crate::subscriber::Subscriber;
pub use crate::subscription::*;
pub use crate::type_hint::TypeHint;
pub use crate::value_subject::{
  LocalBehaviorExt, LocalProjection, LocalValueSubject, SharedValueSubject,
  ValueSubject,
};
