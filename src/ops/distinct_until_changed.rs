use crate::prelude::*;

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  pub(crate) source: S,
}

impl<S> Observable for DistinctUntilChangedOp<S>
where
  S: Observable,
{
  type Item = S::Item;
  type Err = S::Err;
}

impl<'a, S> LocalObservable<'a> for DistinctUntilChangedOp<S>
where
  S: LocalObservable<'a>,
  S::Item: Clone + PartialEq + 'a,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = S::Err> + 'a,
  {
    self.source.actual_subscribe(DistinctUntilChangedObserver {
      observer,
      last: None,
    })
  }
}

impl<S> SharedObservable for DistinctUntilChangedOp<S>
where
  S: SharedObservable,
  S::Item: Clone + PartialEq + Send + Sync + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = S::Err> + Send + Sync + 'static,
  {
    self.source.actual_subscribe(DistinctUntilChangedObserver {
      observer,
      last: None,
    })
  }
}

pub struct DistinctUntilChangedObserver<O, Item> {
  observer: O,
  last: Option<Item>,
}

impl<O, Item> Observer for DistinctUntilChangedObserver<O, Item>
where
  O: Observer<Item = Item>,
  Item: Clone + PartialEq,
{
  type Item = Item;
  type Err = O::Err;

  fn next(&mut self, value: Item) {
    if self.last.as_ref() != Some(&value) {
      self.last = Some(value.clone());
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Self::Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
