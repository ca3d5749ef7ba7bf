/// An Observer is a consumer of values delivered by an Observable. One
/// Observer is a set of callbacks, one for each type of notification
/// delivered by the Observable: `next`, `error`, and `complete`.
pub trait Observer {
  type Item;
  type Err;
  fn next(&mut self, value: Self::Item);
  fn error(&mut self, err: Self::Err);
  fn complete(&mut self);
}

impl<T: Observer + ?Sized> Observer for Box<T> {
  type Item = T::Item;
  type Err = T::Err;
  #[inline]
  fn next(&mut self, value: Self::Item) { (**self).next(value) }
  #[inline]
  fn error(&mut self, err: Self::Err) { (**self).error(err) }
  #[inline]
  fn complete(&mut self) { (**self).complete() }
}
