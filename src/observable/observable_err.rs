use crate::prelude::*;

#[derive(Clone)]
pub struct ObserverErr<N, E, Item, Err> {
  next: N,
  error: E,
  _hint: TypeHint<(Item, Err)>,
}

impl<N, E, Item, Err> ObserverErr<N, E, Item, Err> {
  #[inline]
  pub(crate) fn new(next: N, error: E) -> Self {
    ObserverErr {
      next,
      error,
      _hint: TypeHint::new(),
    }
  }
}

impl<Item, Err, N, E> Observer for ObserverErr<N, E, Item, Err>
where
  N: FnMut(Item),
  E: FnMut(Err),
{
  type Item = Item;
  type Err = Err;
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(&mut self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn complete(&mut self) {}
}

pub trait SubscribeErr<'a, N, E> {
  /// A type implementing [`SubscriptionLike`]
  type Unsub: SubscriptionLike;

  /// Invokes an execution of an Observable and registers Observer handlers
  /// for the values it will emit and the error it may terminate with.
  fn subscribe_err(self, next: N, error: E) -> SubscriptionWrapper<Self::Unsub>;
}

impl<'a, S, N, E> SubscribeErr<'a, N, E> for S
where
  S: LocalObservable<'a>,
  S::Item: 'a,
  S::Err: 'a,
  N: FnMut(S::Item) + 'a,
  E: FnMut(S::Err) + 'a,
{
  type Unsub = S::Unsub;
  fn subscribe_err(self, next: N, error: E) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.actual_subscribe(ObserverErr::new(next, error)))
  }
}

impl<'a, S, N, E> SubscribeErr<'a, N, E> for Shared<S>
where
  S: SharedObservable,
  S::Item: 'static,
  S::Err: 'static,
  N: FnMut(S::Item) + Send + Sync + 'static,
  E: FnMut(S::Err) + Send + Sync + 'static,
{
  type Unsub = S::Unsub;
  fn subscribe_err(self, next: N, error: E) -> SubscriptionWrapper<Self::Unsub> {
    SubscriptionWrapper(self.0.actual_subscribe(ObserverErr::new(next, error)))
  }
}
