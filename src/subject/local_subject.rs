use crate::prelude::*;

type LocalPublishers<'a, Item, Err> =
  MutRc<Vec<Box<dyn Publisher<Item = Item, Err = Err> + 'a>>>;

/// A single-thread broadcast subject: both an `Observer` (publish side) and
/// a `LocalObservable` (subscribe side). Values are cloned per subscriber.
///
/// Emitting from inside one of its own notifications is not supported and
/// panics (the observer list is behind a `RefCell`).
pub struct LocalSubject<'a, Item, Err> {
  observers: LocalPublishers<'a, Item, Err>,
  subscription: LocalSubscription,
}

impl<'a, Item, Err> LocalSubject<'a, Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// How many subscribers are currently attached.
  pub fn subscribed_size(&self) -> usize { self.observers.rc_deref().len() }
}

impl<'a, Item, Err> Default for LocalSubject<'a, Item, Err> {
  fn default() -> Self {
    LocalSubject {
      observers: MutRc::own(vec![]),
      subscription: LocalSubscription::default(),
    }
  }
}

impl<'a, Item, Err> Clone for LocalSubject<'a, Item, Err> {
  fn clone(&self) -> Self {
    LocalSubject {
      observers: self.observers.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<'a, Item, Err> Observer for LocalSubject<'a, Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  type Item = Item;
  type Err = Err;

  fn next(&mut self, value: Item) {
    if self.subscription.is_closed() {
      return;
    }
    self.observers.rc_deref_mut().retain_mut(|o| {
      if o.is_closed() {
        false
      } else {
        o.next(value.clone());
        !o.is_closed()
      }
    });
  }

  fn error(&mut self, err: Err) {
    if self.subscription.is_closed() {
      return;
    }
    let observers = std::mem::take(&mut *self.observers.rc_deref_mut());
    for mut o in observers {
      o.error(err.clone());
    }
    self.subscription.unsubscribe();
  }

  fn complete(&mut self) {
    if self.subscription.is_closed() {
      return;
    }
    let observers = std::mem::take(&mut *self.observers.rc_deref_mut());
    for mut o in observers {
      o.complete();
    }
    self.subscription.unsubscribe();
  }
}

impl<'a, Item, Err> SubscriptionLike for LocalSubject<'a, Item, Err> {
  #[inline]
  fn unsubscribe(&mut self) { self.subscription.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.subscription.is_closed() }
}

impl<'a, Item, Err> Observable for LocalSubject<'a, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, Item, Err> LocalObservable<'a> for LocalSubject<'a, Item, Err> {
  type Unsub = MutRc<SingleSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + 'a,
  {
    let unsub = MutRc::own(SingleSubscription::default());
    if self.subscription.is_closed() {
      return unsub;
    }
    let subscriber = Subscriber::new(observer, unsub.clone());
    self.observers.rc_deref_mut().push(Box::new(subscriber));
    unsub
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::cell::{Cell, RefCell};
  use std::convert::Infallible;
  use std::rc::Rc;

  #[test]
  fn base_data_flow() {
    let value = Rc::new(Cell::new(0));
    let c_value = value.clone();
    let mut subject = LocalSubject::<'_, i32, Infallible>::new();
    subject.clone().subscribe(move |v| c_value.set(v * 2));
    subject.next(1);
    assert_eq!(value.get(), 2);
  }

  #[test]
  fn unsubscribed_receives_nothing() {
    let value = Rc::new(Cell::new(0));
    let c_value = value.clone();
    let mut subject = LocalSubject::<'_, i32, Infallible>::new();
    subject
      .clone()
      .subscribe(move |v| c_value.set(v))
      .unsubscribe();
    subject.next(100);
    assert_eq!(value.get(), 0);
  }

  #[test]
  fn complete_drains_subscribers() {
    let completed = Rc::new(Cell::new(0));
    let c_completed = completed.clone();
    let mut subject = LocalSubject::<'_, i32, Infallible>::new();
    subject
      .clone()
      .subscribe_complete(|_| {}, move || c_completed.set(c_completed.get() + 1));
    subject.complete();
    subject.complete();
    assert_eq!(completed.get(), 1);
    assert_eq!(subject.subscribed_size(), 0);
  }

  #[test]
  fn error_reaches_all_then_closes() {
    let errors = Rc::new(RefCell::new(vec![]));
    let e1 = errors.clone();
    let e2 = errors.clone();
    let mut subject = LocalSubject::<'_, i32, &str>::new();
    subject
      .clone()
      .subscribe_err(|_| {}, move |e| e1.borrow_mut().push(e));
    subject
      .clone()
      .subscribe_err(|_| {}, move |e| e2.borrow_mut().push(e));
    subject.error("boom");
    subject.next(1);
    assert_eq!(*errors.borrow(), vec!["boom", "boom"]);
  }

  #[test]
  fn late_subscriber_after_complete_gets_nothing() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let mut subject = LocalSubject::<'_, i32, Infallible>::new();
    subject.complete();
    subject.clone().subscribe(move |_| c_hits.set(c_hits.get() + 1));
    assert_eq!(subject.subscribed_size(), 0);
    assert_eq!(hits.get(), 0);
  }
}
