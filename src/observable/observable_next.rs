use crate::prelude::*;
use std::convert::Infallible;

#[derive(Clone)]
pub struct ObserverN<N, Item> {
  next: N,
  _hint: TypeHint<Item>,
}

impl<N, Item> ObserverN<N, Item> {
  #[inline]
  pub(crate) fn new(next: N) -> Self {
    ObserverN {
      next,
      _hint: TypeHint::new(),
    }
  }
}

impl<N, Item> Observer for ObserverN<N, Item>
where
  N: FnMut(Item),
{
  type Item = Item;
  type Err = Infallible;
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(&mut self, err: Infallible) { match err {} }
  #[inline(always)]
  fn complete(&mut self) {}
}

pub trait SubscribeNext<'a, N> {
  /// A type implementing [`SubscriptionLike`]
  type Unsub: SubscriptionLike;

  /// Invokes an execution of an Observable and registers Observer handlers
  /// for the values it will emit. Only available on streams that cannot
  /// fail.
  fn subscribe(self, next: N) -> SubscriptionWrapper<Self::Unsub>;
}

impl<'a, S, N> SubscribeNext<'a, N> for S
where
  S: LocalObservable<'a, Err = Infallible>,
  S::Item: 'a,
  N: FnMut(S::Item) + 'a,
{
  type Unsub = S::Unsub;
  fn subscribe(self, next: N) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.actual_subscribe(ObserverN::new(next)))
  }
}

impl<'a, S, N> SubscribeNext<'a, N> for Shared<S>
where
  S: SharedObservable<Err = Infallible>,
  S::Item: 'static,
  N: FnMut(S::Item) + Send + Sync + 'static,
{
  type Unsub = S::Unsub;
  fn subscribe(self, next: N) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.0.actual_subscribe(ObserverN::new(next)))
  }
}
