use crate::prelude::*;

/// Creates an observable that emits no items, just terminates with an error.
///
/// The item type is free; annotate it at the call site when inference needs
/// help: `throw::<i32, _>("boom")`.
pub fn throw<Item, Err>(err: Err) -> ObservableThrow<Item, Err> {
  ObservableThrow(err, TypeHint::new())
}

#[derive(Clone)]
pub struct ObservableThrow<Item, Err>(Err, TypeHint<Item>);

impl<Item, Err> Observable for ObservableThrow<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, Item, Err> LocalObservable<'a> for ObservableThrow<Item, Err> {
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + 'a,
  {
    observer.error(self.0);
    SingleSubscription::default()
  }
}

impl<Item, Err> SharedObservable for ObservableThrow<Item, Err> {
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + Send + Sync + 'static,
  {
    observer.error(self.0);
    SingleSubscription::default()
  }
}
