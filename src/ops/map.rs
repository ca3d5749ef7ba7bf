use crate::prelude::*;

#[derive(Clone)]
pub struct MapOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<S, F, B> Observable for MapOp<S, F>
where
  S: Observable,
  F: FnMut(S::Item) -> B,
{
  type Item = B;
  type Err = S::Err;
}

impl<'a, S, F, B> LocalObservable<'a> for MapOp<S, F>
where
  S: LocalObservable<'a>,
  S::Item: 'a,
  F: FnMut(S::Item) -> B + 'a,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = B, Err = S::Err> + 'a,
  {
    self.source.actual_subscribe(MapObserver {
      observer,
      map: self.func,
      _hint: TypeHint::new(),
    })
  }
}

impl<S, F, B> SharedObservable for MapOp<S, F>
where
  S: SharedObservable,
  S::Item: 'static,
  F: FnMut(S::Item) -> B + Send + Sync + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = B, Err = S::Err> + Send + Sync + 'static,
  {
    self.source.actual_subscribe(MapObserver {
      observer,
      map: self.func,
      _hint: TypeHint::new(),
    })
  }
}

pub struct MapObserver<O, M, Item> {
  observer: O,
  map: M,
  _hint: TypeHint<Item>,
}

impl<O, M, Item> Observer for MapObserver<O, M, Item>
where
  O: Observer,
  M: FnMut(Item) -> O::Item,
{
  type Item = Item;
  type Err = O::Err;

  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  #[inline]
  fn error(&mut self, err: Self::Err) { self.observer.error(err) }

  #[inline]
  fn complete(&mut self) { self.observer.complete() }
}
