use crate::prelude::*;

/// Pairs an observer with a subscription. Events are gated on the
/// subscription: once it is closed nothing is forwarded, and a terminal
/// event closes it before being forwarded.
pub struct Subscriber<O, U> {
  pub(crate) observer: O,
  pub(crate) subscription: U,
}

impl<O> Subscriber<O, LocalSubscription> {
  pub fn local(observer: O) -> Self {
    Subscriber {
      observer,
      subscription: LocalSubscription::default(),
    }
  }
}

impl<O> Subscriber<O, SharedSubscription> {
  pub fn shared(observer: O) -> Self {
    Subscriber {
      observer,
      subscription: SharedSubscription::default(),
    }
  }
}

impl<O, U> Subscriber<O, U> {
  pub fn new(observer: O, subscription: U) -> Self {
    Subscriber {
      observer,
      subscription,
    }
  }
}

impl<O, U> Observer for Subscriber<O, U>
where
  O: Observer,
  U: SubscriptionLike,
{
  type Item = O::Item;
  type Err = O::Err;

  fn next(&mut self, value: Self::Item) {
    if !self.subscription.is_closed() {
      self.observer.next(value)
    }
  }

  fn error(&mut self, err: Self::Err) {
    if !self.subscription.is_closed() {
      self.subscription.unsubscribe();
      self.observer.error(err)
    }
  }

  fn complete(&mut self) {
    if !self.subscription.is_closed() {
      self.subscription.unsubscribe();
      self.observer.complete()
    }
  }
}

impl<O, U> SubscriptionLike for Subscriber<O, U>
where
  U: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) { self.subscription.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.subscription.is_closed() }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::cell::Cell;
  use std::convert::Infallible;
  use std::rc::Rc;

  struct Counting {
    next: Rc<Cell<i32>>,
    complete: Rc<Cell<i32>>,
  }

  impl Observer for Counting {
    type Item = i32;
    type Err = Infallible;
    fn next(&mut self, _: i32) { self.next.set(self.next.get() + 1) }
    fn error(&mut self, err: Infallible) { match err {} }
    fn complete(&mut self) { self.complete.set(self.complete.get() + 1) }
  }

  #[test]
  fn stops_after_complete() {
    let next = Rc::new(Cell::new(0));
    let complete = Rc::new(Cell::new(0));
    let mut subscriber = Subscriber::local(Counting {
      next: next.clone(),
      complete: complete.clone(),
    });
    subscriber.next(1);
    subscriber.next(2);
    subscriber.complete();
    subscriber.next(3);
    subscriber.complete();
    assert_eq!(next.get(), 2);
    assert_eq!(complete.get(), 1);
  }

  #[test]
  fn stops_after_unsubscribe() {
    let next = Rc::new(Cell::new(0));
    let complete = Rc::new(Cell::new(0));
    let mut subscriber = Subscriber::local(Counting {
      next: next.clone(),
      complete: complete.clone(),
    });
    subscriber.next(1);
    subscriber.unsubscribe();
    subscriber.next(2);
    subscriber.complete();
    assert_eq!(next.get(), 1);
    assert_eq!(complete.get(), 0);
  }
}
