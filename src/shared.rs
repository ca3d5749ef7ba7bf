use crate::prelude::*;

/// Marks a stream to be subscribed with thread-safe observers. The
/// `subscribe*` sugar on `Shared<S>` routes to the `SharedObservable`
/// implementation of `S` and requires `Send + Sync` callbacks.
#[derive(Clone)]
pub struct Shared<R>(pub(crate) R);

impl<R> Shared<R> {
  #[inline]
  pub fn into_inner(self) -> R { self.0 }
}

impl<R: Observable> Observable for Shared<R> {
  type Item = R::Item;
  type Err = R::Err;
}

pub trait IntoShared: Sized {
  fn into_shared(self) -> Shared<Self>;
}

impl<T: SharedObservable + Sized> IntoShared for T {
  #[inline]
  fn into_shared(self) -> Shared<Self> { Shared(self) }
}
