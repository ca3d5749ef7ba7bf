use crate::prelude::*;

type SharedPublishers<Item, Err> =
  MutArc<Vec<Box<dyn Publisher<Item = Item, Err = Err> + Send>>>;

/// The thread-safe counterpart of [`LocalSubject`]: observers live behind a
/// mutex and may be fed from any thread.
///
/// Emitting from inside one of its own notifications deadlocks (the
/// observer list is behind a non-reentrant `Mutex`).
pub struct SharedSubject<Item, Err> {
  observers: SharedPublishers<Item, Err>,
  subscription: SharedSubscription,
}

impl<Item, Err> SharedSubject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn subscribed_size(&self) -> usize { self.observers.rc_deref().len() }
}

impl<Item, Err> Default for SharedSubject<Item, Err> {
  fn default() -> Self {
    SharedSubject {
      observers: MutArc::own(vec![]),
      subscription: SharedSubscription::default(),
    }
  }
}

impl<Item, Err> Clone for SharedSubject<Item, Err> {
  fn clone(&self) -> Self {
    SharedSubject {
      observers: self.observers.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<Item, Err> Observer for SharedSubject<Item, Err>
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

impl<Item, Err> SubscriptionLike for SharedSubject<Item, Err> {
  #[inline]
  fn unsubscribe(&mut self) { self.subscription.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.subscription.is_closed() }
}

impl<Item, Err> Observable for SharedSubject<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err> SharedObservable for SharedSubject<Item, Err> {
  type Unsub = MutArc<SingleSubscription>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Err> + Send + Sync + 'static,
  {
    let unsub = MutArc::own(SingleSubscription::default());
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
  use std::convert::Infallible;
  use std::sync::{Arc, Mutex};
  use std::thread;

  #[test]
  fn emit_from_another_thread() {
    let value = Arc::new(Mutex::new(0));
    let c_value = value.clone();
    let subject = SharedSubject::<i32, Infallible>::new();
    subject
      .clone()
      .into_shared()
      .subscribe(move |v| *c_value.lock().unwrap() = v);
    let mut remote = subject.clone();
    thread::spawn(move || remote.next(42))
      .join()
      .unwrap();
    assert_eq!(*value.lock().unwrap(), 42);
  }

  #[test]
  fn prunes_closed_subscribers() {
    let subject = SharedSubject::<i32, Infallible>::new();
    let mut first = subject.clone().into_shared().subscribe(|_| {});
    subject.clone().into_shared().subscribe(|_| {});
    assert_eq!(subject.subscribed_size(), 2);
    first.unsubscribe();
    let mut feed = subject.clone();
    feed.next(1);
    assert_eq!(subject.subscribed_size(), 1);
  }
}
