use crate::prelude::*;
use std::convert::Infallible;

#[derive(Clone)]
pub struct ObserverComp<N, C, Item> {
  next: N,
  complete: C,
  _hint: TypeHint<Item>,
}

impl<N, C, Item> ObserverComp<N, C, Item> {
  #[inline]
  pub(crate) fn new(next: N, complete: C) -> Self {
    ObserverComp {
      next,
      complete,
      _hint: TypeHint::new(),
    }
  }
}

impl<Item, N, C> Observer for ObserverComp<N, C, Item>
where
  N: FnMut(Item),
  C: FnMut(),
{
  type Item = Item;
  type Err = Infallible;
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(&mut self, err: Infallible) { match err {} }
  #[inline(always)]
  fn complete(&mut self) { (self.complete)(); }
}

pub trait SubscribeComplete<'a, N, C> {
  /// A type implementing [`SubscriptionLike`]
  type Unsub: SubscriptionLike;

  /// Invokes an execution of an Observable and registers Observer handlers
  /// for the values it will emit and for completion. Only available on
  /// streams that cannot fail.
  fn subscribe_complete(
    self,
    next: N,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub>;
}

impl<'a, S, N, C> SubscribeComplete<'a, N, C> for S
where
  S: LocalObservable<'a, Err = Infallible>,
  S::Item: 'a,
  N: FnMut(S::Item) + 'a,
  C: FnMut() + 'a,
{
  type Unsub = S::Unsub;
  fn subscribe_complete(
    self,
    next: N,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.actual_subscribe(ObserverComp::new(next, complete)))
  }
}

impl<'a, S, N, C> SubscribeComplete<'a, N, C> for Shared<S>
where
  S: SharedObservable<Err = Infallible>,
  S::Item: 'static,
  N: FnMut(S::Item) + Send + Sync + 'static,
  C: FnMut() + Send + Sync + 'static,
{
  type Unsub = S::Unsub;
  fn subscribe_complete(
    self,
    next: N,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.0.actual_subscribe(ObserverComp::new(next, complete)))
  }
}
