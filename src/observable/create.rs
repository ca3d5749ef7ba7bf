use crate::prelude::*;

/// Creates an observable from the given subscribe function. Each
/// subscription invokes `subscribe` with the new observer; emission happens
/// synchronously inside it.
pub fn create<F, Item, Err>(subscribe: F) -> ObservableFn<F, Item, Err>
where
  F: FnOnce(&mut dyn Observer<Item = Item, Err = Err>),
{
  ObservableFn(subscribe, TypeHint::new())
}

#[derive(Clone)]
pub struct ObservableFn<F, Item, Err>(F, TypeHint<(Item, Err)>);

impl<F, Item, Err> Observable for ObservableFn<F, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, F, Item, Err> LocalObservable<'a> for ObservableFn<F, Item, Err>
where
  F: FnOnce(&mut dyn Observer<Item = Item, Err = Err>),
{
  type Unsub = SingleSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + 'a,
  {
    let mut subscriber = Subscriber::new(observer, SingleSubscription::default());
    (self.0)(&mut subscriber);
    subscriber.subscription
  }
}

impl<F, Item, Err> SharedObservable for ObservableFn<F, Item, Err>
where
  F: FnOnce(&mut dyn Observer<Item = Item, Err = Err>),
{
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + Send + Sync + 'static,
  {
    let subscription = SharedSubscription::default();
    let mut subscriber = Subscriber::new(observer, subscription.clone());
    (self.0)(&mut subscriber);
    subscription
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn emits_synchronously() {
    let mut collected = vec![];
    let mut completed = false;
    create(|o: &mut dyn Observer<Item = i32, Err = &str>| {
      o.next(1);
      o.next(2);
      o.complete();
    })
    .subscribe_all(|v| collected.push(v), |_| {}, || completed = true);
    assert_eq!(collected, vec![1, 2]);
    assert!(completed);
  }

  #[test]
  fn stops_after_terminal() {
    let mut collected = vec![];
    create(|o: &mut dyn Observer<Item = i32, Err = &str>| {
      o.next(1);
      o.error("boom");
      o.next(2);
    })
    .subscribe_all(|v| collected.push(v), |_| {}, || {});
    assert_eq!(collected, vec![1]);
  }
}
