use crate::prelude::*;
use std::convert::Infallible;

/// On failure, switches to the stream produced by `recover`, feeding it the
/// error. The substitute's own failures are downgraded to completion, so
/// the resulting stream cannot fail.
#[derive(Clone)]
pub struct ErrorRecoverOp<S, F> {
  pub(crate) source: S,
  pub(crate) recover: F,
}

impl<S, F, R> Observable for ErrorRecoverOp<S, F>
where
  S: Observable,
  F: FnMut(S::Err) -> R,
  R: Observable<Item = S::Item>,
{
  type Item = S::Item;
  type Err = Infallible;
}

impl<'a, S, F, R> LocalObservable<'a> for ErrorRecoverOp<S, F>
where
  S: LocalObservable<'a>,
  S::Item: 'a,
  S::Err: 'a,
  F: FnMut(S::Err) -> R + 'a,
  R: LocalObservable<'a, Item = S::Item> + 'a,
  R::Err: 'a,
{
  type Unsub = LocalSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + 'a,
  {
    let subscription = LocalSubscription::default();
    let u = self.source.actual_subscribe(LocalErrorRecoverObserver {
      observer: Some(observer),
      recover: Some(self.recover),
      subscription: subscription.clone(),
      _hint: TypeHint::new(),
    });
    subscription.add(u);
    subscription
  }
}

impl<S, F, R> SharedObservable for ErrorRecoverOp<S, F>
where
  S: SharedObservable,
  S::Item: 'static,
  S::Err: 'static,
  F: FnMut(S::Err) -> R + Send + Sync + 'static,
  R: SharedObservable<Item = S::Item>,
  R::Err: 'static,
{
  type Unsub = SharedSubscription;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + Send + Sync + 'static,
  {
    let subscription = SharedSubscription::default();
    let u = self.source.actual_subscribe(SharedErrorRecoverObserver {
      observer: Some(observer),
      recover: Some(self.recover),
      subscription: subscription.clone(),
      _hint: TypeHint::new(),
    });
    subscription.add(u);
    subscription
  }
}

/// Holds the downstream until a terminal event. On error both the observer
/// and the recover function are taken, the substitute stream is subscribed
/// with the original downstream, and its teardown joins the outer
/// subscription.
pub struct LocalErrorRecoverObserver<'a, O, F, Err> {
  observer: Option<O>,
  recover: Option<F>,
  subscription: LocalSubscription,
  _hint: TypeHint<&'a Err>,
}

impl<'a, O, F, R, Err> Observer for LocalErrorRecoverObserver<'a, O, F, Err>
where
  O: Observer<Err = Infallible> + 'a,
  O::Item: 'a,
  F: FnMut(Err) -> R,
  R: LocalObservable<'a, Item = O::Item> + 'a,
  R::Err: 'a,
{
  type Item = O::Item;
  type Err = Err;

  fn next(&mut self, value: Self::Item) {
    if let Some(o) = self.observer.as_mut() {
      o.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if let (Some(observer), Some(mut recover)) =
      (self.observer.take(), self.recover.take())
    {
      let u = recover(err).complete_on_error().actual_subscribe(observer);
      self.subscription.add(u);
    }
  }

  fn complete(&mut self) {
    if let Some(mut o) = self.observer.take() {
      o.complete();
    }
  }
}

pub struct SharedErrorRecoverObserver<O, F, Err> {
  observer: Option<O>,
  recover: Option<F>,
  subscription: SharedSubscription,
  _hint: TypeHint<Err>,
}

impl<O, F, R, Err> Observer for SharedErrorRecoverObserver<O, F, Err>
where
  O: Observer<Err = Infallible> + Send + Sync + 'static,
  O::Item: 'static,
  F: FnMut(Err) -> R,
  R: SharedObservable<Item = O::Item>,
  R::Err: 'static,
{
  type Item = O::Item;
  type Err = Err;

  fn next(&mut self, value: Self::Item) {
    if let Some(o) = self.observer.as_mut() {
      o.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if let (Some(observer), Some(mut recover)) =
      (self.observer.take(), self.recover.take())
    {
      let u = recover(err).complete_on_error().actual_subscribe(observer);
      self.subscription.add(u);
    }
  }

  fn complete(&mut self) {
    if let Some(mut o) = self.observer.take() {
      o.complete();
    }
  }
}
