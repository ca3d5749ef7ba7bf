use crate::prelude::*;
use std::convert::Infallible;

/// Creates an observable that emits every item of `iter` and completes. It
/// never fails.
pub fn from_iter<I>(iter: I) -> ObservableFromIter<I>
where
  I: IntoIterator,
{
  ObservableFromIter(iter)
}

#[derive(Clone)]
pub struct ObservableFromIter<I>(I);

impl<I> Observable for ObservableFromIter<I>
where
  I: IntoIterator,
{
  type Item = I::Item;
  type Err = Infallible;
}

impl<'a, I> LocalObservable<'a> for ObservableFromIter<I>
where
  I: IntoIterator,
{
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = I::Item, Err = Infallible> + 'a,
  {
    for v in self.0 {
      observer.next(v);
    }
    observer.complete();
    SingleSubscription::default()
  }
}

impl<I> SharedObservable for ObservableFromIter<I>
where
  I: IntoIterator,
{
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = I::Item, Err = Infallible> + Send + Sync + 'static,
  {
    for v in self.0 {
      observer.next(v);
    }
    observer.complete();
    SingleSubscription::default()
  }
}
