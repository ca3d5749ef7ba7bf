use crate::ops::{
  complete_on_error::CompleteOnErrorOp, distinct_until_changed::DistinctUntilChangedOp,
  error_recover::ErrorRecoverOp, error_return::ErrorReturnOp, map::MapOp,
};
use crate::prelude::*;

mod create;
pub use create::*;
mod of;
pub use of::*;
mod from_iter;
pub use from_iter::*;
mod throw;
pub use throw::*;

mod observable_next;
pub use observable_next::*;
mod observable_err;
pub use observable_err::*;
mod observable_comp;
pub use observable_comp::*;
mod observable_all;
pub use observable_all::*;

/// The base of every stream: names the value and failure types and carries
/// the fluent operator constructors.
pub trait Observable {
  type Item;
  type Err;

  /// Transform the items emitted by this stream with `func`.
  #[inline]
  fn map<B, F>(self, func: F) -> MapOp<Self, F>
  where
    Self: Sized,
    F: FnMut(Self::Item) -> B,
  {
    MapOp { source: self, func }
  }

  /// Suppress an item when it is equal to the previously emitted one.
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self>
  where
    Self: Sized,
    Self::Item: Clone + PartialEq,
  {
    DistinctUntilChangedOp { source: self }
  }

  /// Convert any failure of this stream into normal completion.
  #[inline]
  fn complete_on_error(self) -> CompleteOnErrorOp<Self>
  where
    Self: Sized,
  {
    CompleteOnErrorOp { source: self }
  }

  /// Convert a failure into one final `default` item followed by completion.
  #[inline]
  fn error_return(self, default: Self::Item) -> ErrorReturnOp<Self>
  where
    Self: Sized,
  {
    ErrorReturnOp {
      source: self,
      default,
    }
  }

  /// On failure, switch to the stream produced by `recover`. Failures of
  /// the substitute stream are downgraded to completion, so the result
  /// never fails.
  #[inline]
  fn error_recover<F, R>(self, recover: F) -> ErrorRecoverOp<Self, F>
  where
    Self: Sized,
    F: FnMut(Self::Err) -> R,
    R: Observable<Item = Self::Item>,
  {
    ErrorRecoverOp {
      source: self,
      recover,
    }
  }
}

/// A stream subscribable on the current thread. Observers need not be
/// `Send`; subscriptions may hold `Rc` state.
pub trait LocalObservable<'a>: Observable {
  type Unsub: SubscriptionLike + 'static;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Self::Item, Err = Self::Err> + 'a;
}

/// A stream whose subscription may cross threads. Observers must be
/// `Send + Sync + 'static` and the returned subscription is shareable.
pub trait SharedObservable: Observable {
  type Unsub: SubscriptionLike + Send + Sync + 'static;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Self::Item, Err = Self::Err> + Send + Sync + 'static;
}
