use crate::prelude::*;
use std::convert::Infallible;

/// Replaces a failure of the source with one final `default` item followed
/// by completion.
pub struct ErrorReturnOp<S: Observable> {
  pub(crate) source: S,
  pub(crate) default: S::Item,
}

impl<S> Clone for ErrorReturnOp<S>
where
  S: Observable + Clone,
  S::Item: Clone,
{
  fn clone(&self) -> Self {
    ErrorReturnOp {
      source: self.source.clone(),
      default: self.default.clone(),
    }
  }
}

impl<S> Observable for ErrorReturnOp<S>
where
  S: Observable,
{
  type Item = S::Item;
  type Err = Infallible;
}

impl<'a, S> LocalObservable<'a> for ErrorReturnOp<S>
where
  S: LocalObservable<'a>,
  S::Item: 'a,
  S::Err: 'a,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + 'a,
  {
    self.source.actual_subscribe(ErrorReturnObserver {
      observer,
      default: Some(self.default),
      _hint: TypeHint::new(),
    })
  }
}

impl<S> SharedObservable for ErrorReturnOp<S>
where
  S: SharedObservable,
  S::Item: Send + Sync + 'static,
  S::Err: 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + Send + Sync + 'static,
  {
    self.source.actual_subscribe(ErrorReturnObserver {
      observer,
      default: Some(self.default),
      _hint: TypeHint::new(),
    })
  }
}

pub struct ErrorReturnObserver<O: Observer, Err> {
  observer: O,
  default: Option<O::Item>,
  _hint: TypeHint<Err>,
}

impl<O, Err> Observer for ErrorReturnObserver<O, Err>
where
  O: Observer<Err = Infallible>,
{
  type Item = O::Item;
  type Err = Err;

  #[inline]
  fn next(&mut self, value: Self::Item) { self.observer.next(value) }

  fn error(&mut self, _err: Err) {
    if let Some(default) = self.default.take() {
      self.observer.next(default);
    }
    self.observer.complete();
  }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
