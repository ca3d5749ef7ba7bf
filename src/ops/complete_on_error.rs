use crate::prelude::*;
use std::convert::Infallible;

/// Turns any failure of the source into normal completion, yielding a
/// stream that cannot fail.
#[derive(Clone)]
pub struct CompleteOnErrorOp<S> {
  pub(crate) source: S,
}

impl<S> Observable for CompleteOnErrorOp<S>
where
  S: Observable,
{
  type Item = S::Item;
  type Err = Infallible;
}

impl<'a, S> LocalObservable<'a> for CompleteOnErrorOp<S>
where
  S: LocalObservable<'a>,
  S::Err: 'a,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + 'a,
  {
    self.source.actual_subscribe(CompleteOnErrorObserver {
      observer,
      _hint: TypeHint::new(),
    })
  }
}

impl<S> SharedObservable for CompleteOnErrorOp<S>
where
  S: SharedObservable,
  S::Err: 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + Send + Sync + 'static,
  {
    self.source.actual_subscribe(CompleteOnErrorObserver {
      observer,
      _hint: TypeHint::new(),
    })
  }
}

pub struct CompleteOnErrorObserver<O, Err> {
  pub(crate) observer: O,
  pub(crate) _hint: TypeHint<Err>,
}

impl<O, Err> Observer for CompleteOnErrorObserver<O, Err>
where
  O: Observer<Err = Infallible>,
{
  type Item = O::Item;
  type Err = Err;

  #[inline]
  fn next(&mut self, value: Self::Item) { self.observer.next(value) }

  fn error(&mut self, _err: Err) { self.observer.complete() }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
