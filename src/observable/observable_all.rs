use crate::prelude::*;

#[derive(Clone)]
pub struct ObserverAll<N, E, C, Item, Err> {
  next: N,
  error: E,
  complete: C,
  _hint: TypeHint<(Item, Err)>,
}

impl<N, E, C, Item, Err> ObserverAll<N, E, C, Item, Err> {
  #[inline]
  pub(crate) fn new(next: N, error: E, complete: C) -> Self {
    ObserverAll {
      next,
      error,
      complete,
      _hint: TypeHint::new(),
    }
  }
}

impl<Item, Err, N, E, C> Observer for ObserverAll<N, E, C, Item, Err>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  type Item = Item;
  type Err = Err;
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(&mut self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn complete(&mut self) { (self.complete)(); }
}

pub trait SubscribeAll<'a, N, E, C> {
  /// A type implementing [`SubscriptionLike`]
  type Unsub: SubscriptionLike;

  /// Invokes an execution of an Observable and registers Observer handlers
  /// for every notification it may emit.
  fn subscribe_all(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub>;
}

impl<'a, S, N, E, C> SubscribeAll<'a, N, E, C> for S
where
  S: LocalObservable<'a>,
  S::Item: 'a,
  S::Err: 'a,
  N: FnMut(S::Item) + 'a,
  E: FnMut(S::Err) + 'a,
  C: FnMut() + 'a,
{
  type Unsub = S::Unsub;
  fn subscribe_all(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.actual_subscribe(ObserverAll::new(next, error, complete)))
  }
}

impl<'a, S, N, E, C> SubscribeAll<'a, N, E, C> for Shared<S>
where
  S: SharedObservable,
  S::Item: 'static,
  S::Err: 'static,
  N: FnMut(S::Item) + Send + Sync + 'static,
  E: FnMut(S::Err) + Send + Sync + 'static,
  C: FnMut() + Send + Sync + 'static,
{
  type Unsub = S::Unsub;
  fn subscribe_all(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(
      self.0.actual_subscribe(ObserverAll::new(next, error, complete)),
    )
  }
}
