use crate::prelude::*;
use std::convert::Infallible;

/// Creates an observable that emits `value` once and completes. It never
/// fails.
pub fn of<Item>(value: Item) -> ObservableOf<Item> { ObservableOf(value) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item> Observable for ObservableOf<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<'a, Item> LocalObservable<'a> for ObservableOf<Item> {
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Infallible> + 'a,
  {
    observer.next(self.0);
    observer.complete();
    SingleSubscription::default()
  }
}

impl<Item> SharedObservable for ObservableOf<Item> {
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Infallible> + Send + Sync + 'static,
  {
    observer.next(self.0);
    observer.complete();
    SingleSubscription::default()
  }
}
