use crate::prelude::*;
use std::convert::Infallible;

/// A value cell: holds a current value, broadcasts every write, and replays
/// the current value to new subscribers. Reads and writes are synchronous.
///
/// A cell has no terminal state: `complete` is ignored and the failure type
/// is `Infallible`. Tear one down by unsubscribing it, which also drops the
/// bridges and projections it retains.
pub struct ValueSubject<S, V, B> {
  pub(crate) subject: S,
  pub(crate) value: V,
  pub(crate) binds: B,
}

pub type LocalValueSubject<'a, Item> = ValueSubject<
  LocalSubject<'a, Item, Infallible>,
  MutRc<Item>,
  LocalSubscription,
>;

pub type SharedValueSubject<Item> =
  ValueSubject<SharedSubject<Item, Infallible>, MutArc<Item>, SharedSubscription>;

impl<'a, Item> LocalValueSubject<'a, Item> {
  pub fn new(value: Item) -> Self {
    Self {
      subject: <_>::default(),
      value: MutRc::own(value),
      binds: <_>::default(),
    }
  }
}

impl<Item> SharedValueSubject<Item> {
  pub fn new(value: Item) -> Self {
    Self {
      subject: <_>::default(),
      value: MutArc::own(value),
      binds: <_>::default(),
    }
  }
}

impl<S: Clone, V: Clone, B: Clone> Clone for ValueSubject<S, V, B> {
  fn clone(&self) -> Self {
    ValueSubject {
      subject: self.subject.clone(),
      value: self.value.clone(),
      binds: self.binds.clone(),
    }
  }
}

impl<'a, Item: Clone> Observer for LocalValueSubject<'a, Item> {
  type Item = Item;
  type Err = Infallible;

  fn next(&mut self, value: Item) {
    // Store first, and release the borrow before broadcasting so observers
    // may peek during notification.
    {
      *self.value.rc_deref_mut() = value.clone();
    }
    self.subject.next(value)
  }

  fn error(&mut self, err: Infallible) { match err {} }

  // A value cell has no terminal state.
  #[inline]
  fn complete(&mut self) {}
}

impl<Item: Clone> Observer for SharedValueSubject<Item> {
  type Item = Item;
  type Err = Infallible;

  fn next(&mut self, value: Item) {
    {
      *self.value.rc_deref_mut() = value.clone();
    }
    self.subject.next(value)
  }

  fn error(&mut self, err: Infallible) { match err {} }

  #[inline]
  fn complete(&mut self) {}
}

impl<S, V, B> SubscriptionLike for ValueSubject<S, V, B>
where
  S: SubscriptionLike,
  B: SubscriptionLike,
{
  fn unsubscribe(&mut self) {
    self.binds.unsubscribe();
    self.subject.unsubscribe();
  }

  #[inline]
  fn is_closed(&self) -> bool { self.subject.is_closed() }
}

impl<'a, Item> Observable for LocalValueSubject<'a, Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<'a, Item: Clone> Behavior for LocalValueSubject<'a, Item> {
  #[inline]
  fn peek(&self) -> Item { self.value.rc_deref().clone() }
}

impl<'a, Item: Clone> LocalObservable<'a> for LocalValueSubject<'a, Item> {
  type Unsub = MutRc<SingleSubscription>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Infallible> + 'a,
  {
    observer.next(self.value.rc_deref().clone());
    self.subject.actual_subscribe(observer)
  }
}

impl<Item> Observable for SharedValueSubject<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item: Clone> Behavior for SharedValueSubject<Item> {
  #[inline]
  fn peek(&self) -> Item { self.value.rc_deref().clone() }
}

impl<Item: Clone + 'static> SharedObservable for SharedValueSubject<Item> {
  type Unsub = MutArc<SingleSubscription>;

  fn actual_subscribe<O>(self, mut observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Infallible> + Send + Sync + 'static,
  {
    observer.next(self.value.rc_deref().clone());
    self.subject.actual_subscribe(observer)
  }
}

impl<'a, Item> LocalValueSubject<'a, Item>
where
  Item: Clone + PartialEq + 'a,
{
  /// Two-way bridge to an external value: the cell mirrors `source` and
  /// forwards its own writes through `set`.
  ///
  /// Both directions deduplicate by equality against the last value seen on
  /// the external side, so neither side echoes a change back to where it
  /// came from.
  pub fn bridged<S, F>(source: S, set: F) -> Self
  where
    S: Behavior<Item = Item> + LocalObservable<'a, Err = Infallible> + 'a,
    F: FnMut(Item) + 'a,
  {
    let cell = Self::new(source.peek());
    let last_external = MutRc::own(source.peek());

    // Inbound changes record themselves as the external value before they
    // broadcast, so the outbound link below sees them as already applied.
    let mut inbound = cell.clone();
    let ext = last_external.clone();
    let u = source.actual_subscribe(ObserverN::new(move |v: Item| {
      *ext.rc_deref_mut() = v.clone();
      if *inbound.value.rc_deref() != v {
        inbound.next(v);
      }
    }));
    cell.binds.add(u);

    let mut set = set;
    let ext = last_external;
    let u = cell.clone().actual_subscribe(ObserverN::new(move |v: Item| {
      let changed = *ext.rc_deref() != v;
      if changed {
        *ext.rc_deref_mut() = v.clone();
        set(v);
      }
    }));
    cell.binds.add(u);

    cell
  }

  /// One-way bridge: the cell follows `source` but writes stay local.
  pub fn from_behavior<S>(source: S) -> Self
  where
    S: Behavior<Item = Item> + LocalObservable<'a, Err = Infallible> + 'a,
  {
    let cell = Self::new(source.peek());
    let mut inbound = cell.clone();
    let u = source.actual_subscribe(ObserverN::new(move |v: Item| {
      if *inbound.value.rc_deref() != v {
        inbound.next(v);
      }
    }));
    cell.binds.add(u);
    cell
  }

  /// Read-write projection of one field of this cell's value. See
  /// [`LocalBehaviorExt::map_subject`].
  #[inline]
  pub fn project<U, G, Sf>(&self, get: G, set: Sf) -> LocalValueSubject<'a, U>
  where
    Item: 'a,
    U: Clone + PartialEq + 'a,
    G: Fn(&Item) -> U + Clone + 'a,
    Sf: Fn(&mut Item, U) + 'a,
  {
    self.map_subject(get, set)
  }

  /// Read-only projection of one field of this cell's value. See
  /// [`LocalBehaviorExt::map_peek`].
  #[inline]
  pub fn project_read<U, G>(&self, get: G) -> LocalProjection<'a, U>
  where
    U: Clone + 'a,
    G: Fn(&Item) -> U + 'a,
  {
    self.map_peek(get)
  }
}

/// A read-only view derived from a behavior: replays its current value,
/// follows the source, and can be chained further with `project`.
pub struct LocalProjection<'a, Item> {
  cell: LocalValueSubject<'a, Item>,
}

impl<'a, Item> Clone for LocalProjection<'a, Item> {
  fn clone(&self) -> Self {
    LocalProjection {
      cell: self.cell.clone(),
    }
  }
}

impl<'a, Item> Observable for LocalProjection<'a, Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<'a, Item: Clone> Behavior for LocalProjection<'a, Item> {
  #[inline]
  fn peek(&self) -> Item { self.cell.peek() }
}

impl<'a, Item: Clone> LocalObservable<'a> for LocalProjection<'a, Item> {
  type Unsub = MutRc<SingleSubscription>;

  #[inline]
  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = Item, Err = Infallible> + 'a,
  {
    self.cell.actual_subscribe(observer)
  }
}

impl<'a, Item> SubscriptionLike for LocalProjection<'a, Item> {
  #[inline]
  fn unsubscribe(&mut self) { self.cell.unsubscribe() }
  #[inline]
  fn is_closed(&self) -> bool { self.cell.is_closed() }
}

impl<'a, Item: Clone + 'a> LocalProjection<'a, Item> {
  /// Chain another read-only projection.
  #[inline]
  pub fn project<U, G>(&self, get: G) -> LocalProjection<'a, U>
  where
    U: Clone + 'a,
    G: Fn(&Item) -> U + 'a,
  {
    self.cell.map_peek(get)
  }
}

impl<'a, T: Clone + 'a> LocalProjection<'a, Option<T>> {
  /// Chain through an optional value: the result is absent whenever any
  /// link of the chain is absent.
  pub fn project_some<U, G>(&self, get: G) -> LocalProjection<'a, Option<U>>
  where
    U: Clone + 'a,
    G: Fn(&T) -> U + 'a,
  {
    self
      .cell
      .map_peek(move |v: &Option<T>| v.as_ref().map(|t| get(t)))
  }
}

/// Projections over any local behavior stream.
pub trait LocalBehaviorExt<'a>: Behavior + LocalObservable<'a> + Clone {
  /// Derive a read-only view through `get`, seeded with the current value
  /// and kept live by a retained subscription.
  fn map_peek<U, G>(&self, get: G) -> LocalProjection<'a, U>
  where
    Self: 'a,
    Self::Item: 'a,
    U: Clone + 'a,
    G: Fn(&Self::Item) -> U + 'a;

  /// Derive a read-write cell through a `get`/`set` accessor pair.
  ///
  /// `get` and `set` must agree (reading back what was written); with that,
  /// a change on either side notifies the other exactly once and loops are
  /// cut by equality.
  fn map_subject<U, G, Sf>(&self, get: G, set: Sf) -> LocalValueSubject<'a, U>
  where
    Self: Observer<Item = <Self as Observable>::Item, Err = Infallible> + 'a,
    <Self as Observable>::Item: Clone + 'a,
    U: Clone + PartialEq + 'a,
    G: Fn(&<Self as Observable>::Item) -> U + Clone + 'a,
    Sf: Fn(&mut <Self as Observable>::Item, U) + 'a;
}

impl<'a, T> LocalBehaviorExt<'a> for T
where
  T: Behavior + LocalObservable<'a, Err = Infallible> + Clone,
{
  fn map_peek<U, G>(&self, get: G) -> LocalProjection<'a, U>
  where
    Self: 'a,
    Self::Item: 'a,
    U: Clone + 'a,
    G: Fn(&Self::Item) -> U + 'a,
  {
    let child = LocalValueSubject::new(get(&self.peek()));
    let mut sink = child.clone();
    let u = self
      .clone()
      .actual_subscribe(ObserverN::new(move |v| sink.next(get(&v))));
    child.binds.add(u);
    LocalProjection { cell: child }
  }

  fn map_subject<U, G, Sf>(&self, get: G, set: Sf) -> LocalValueSubject<'a, U>
  where
    Self: Observer<Item = <Self as Observable>::Item, Err = Infallible> + 'a,
    <Self as Observable>::Item: Clone + 'a,
    U: Clone + PartialEq + 'a,
    G: Fn(&<Self as Observable>::Item) -> U + Clone + 'a,
    Sf: Fn(&mut <Self as Observable>::Item, U) + 'a,
  {
    let child = LocalValueSubject::new(get(&self.peek()));

    let mut down = child.clone();
    let down_get = get.clone();
    let u = self.clone().actual_subscribe(ObserverN::new(move |v| {
      let mapped = down_get(&v);
      if *down.value.rc_deref() != mapped {
        down.next(mapped);
      }
    }));
    child.binds.add(u);

    let mut up = self.clone();
    let u = child.clone().actual_subscribe(ObserverN::new(move |mapped: U| {
      let current = up.peek();
      if get(&current) != mapped {
        let mut next = current;
        set(&mut next, mapped);
        up.next(next);
      }
    }));
    child.binds.add(u);

    child
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::cell::RefCell;
  use std::rc::Rc;

  #[derive(Clone, Debug, PartialEq)]
  struct Profile {
    name: String,
    age: u32,
    nick: Option<String>,
  }

  fn profile() -> Profile {
    Profile {
      name: "ada".into(),
      age: 36,
      nick: Some("al".into()),
    }
  }

  #[test]
  fn read_write_round_trip() {
    let cell = LocalValueSubject::new(1);
    assert_eq!(cell.peek(), 1);

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    cell.clone().subscribe(move |v| c_seen.borrow_mut().push(v));

    let mut writer = cell.clone();
    writer.next(2);
    assert_eq!(cell.peek(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn complete_is_ignored() {
    let mut cell = LocalValueSubject::new(1);
    cell.complete();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    cell.clone().subscribe(move |v| c_seen.borrow_mut().push(v));
    cell.next(2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }

  #[test]
  fn bridge_forwards_writes_once() {
    let external = LocalValueSubject::new(1);
    let set_log = Rc::new(RefCell::new(vec![]));
    let c_log = set_log.clone();
    let cell =
      LocalValueSubject::bridged(external.clone(), move |v| c_log.borrow_mut().push(v));

    // Construction must not call the setter.
    assert!(set_log.borrow().is_empty());

    let mut writer = cell.clone();
    writer.next(7);
    assert_eq!(*set_log.borrow(), vec![7]);

    // Writing the current value again is deduplicated on the way out.
    writer.next(7);
    assert_eq!(*set_log.borrow(), vec![7]);
  }

  #[test]
  fn bridge_does_not_echo_inbound_changes() {
    let mut external = LocalValueSubject::new(1);
    let set_log = Rc::new(RefCell::new(vec![]));
    let c_log = set_log.clone();
    let cell =
      LocalValueSubject::bridged(external.clone(), move |v| c_log.borrow_mut().push(v));

    external.next(5);
    assert_eq!(cell.peek(), 5);
    assert!(set_log.borrow().is_empty());
  }

  #[test]
  fn from_behavior_follows_source() {
    let mut external = LocalValueSubject::new(10);
    let cell = LocalValueSubject::from_behavior(external.clone());
    assert_eq!(cell.peek(), 10);
    external.next(11);
    assert_eq!(cell.peek(), 11);
  }

  #[test]
  fn projection_child_write_updates_parent_once() {
    let parent = LocalValueSubject::new(profile());
    let parent_hits = Rc::new(RefCell::new(0));
    let c_hits = parent_hits.clone();
    parent
      .clone()
      .subscribe(move |_| *c_hits.borrow_mut() += 1);
    assert_eq!(*parent_hits.borrow(), 1);

    let age = parent.project(|p| p.age, |p, v| p.age = v);
    let mut writer = age.clone();
    writer.next(40);

    assert_eq!(parent.peek().age, 40);
    assert_eq!(age.peek(), 40);
    // Replay plus exactly one update, no ping-pong.
    assert_eq!(*parent_hits.borrow(), 2);
  }

  #[test]
  fn projection_parent_write_updates_child_once() {
    let parent = LocalValueSubject::new(profile());
    let age = parent.project(|p| p.age, |p, v| p.age = v);

    let child_log = Rc::new(RefCell::new(vec![]));
    let c_log = child_log.clone();
    age.clone().subscribe(move |v| c_log.borrow_mut().push(v));

    let mut writer = parent.clone();
    let mut updated = profile();
    updated.age = 50;
    writer.next(updated);

    assert_eq!(age.peek(), 50);
    assert_eq!(*child_log.borrow(), vec![36, 50]);
  }

  #[test]
  fn projection_unrelated_field_does_not_notify_child() {
    let parent = LocalValueSubject::new(profile());
    let age = parent.project(|p| p.age, |p, v| p.age = v);

    let child_hits = Rc::new(RefCell::new(0));
    let c_hits = child_hits.clone();
    age.clone().subscribe(move |_| *c_hits.borrow_mut() += 1);

    let mut writer = parent.clone();
    let mut updated = profile();
    updated.name = "grace".into();
    writer.next(updated);

    // Replay only; the projected field did not change.
    assert_eq!(*child_hits.borrow(), 1);
  }

  #[test]
  fn optional_chain_goes_absent_with_any_link() {
    let parent = LocalValueSubject::new(profile());
    let nick_len = parent
      .project_read(|p| p.nick.clone())
      .project_some(|nick| nick.len());
    assert_eq!(nick_len.peek(), Some(2));

    let mut writer = parent.clone();
    let mut updated = profile();
    updated.nick = None;
    writer.next(updated);
    assert_eq!(nick_len.peek(), None);
  }

  #[test]
  fn map_peek_pipeline() {
    let cell = LocalValueSubject::new(3);
    let doubled = cell.map_peek(|v| v * 2);

    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    doubled
      .clone()
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    let mut writer = cell.clone();
    writer.next(5);

    assert_eq!(doubled.peek(), 10);
    assert_eq!(*seen.borrow(), vec![6, 10]);
  }

  #[test]
  fn map_subject_deduplicates_both_ways() {
    let source = LocalValueSubject::new(profile());
    let name = source.map_subject(|p| p.name.clone(), |p, v| p.name = v);

    let source_hits = Rc::new(RefCell::new(0));
    let c_hits = source_hits.clone();
    source
      .clone()
      .subscribe(move |_| *c_hits.borrow_mut() += 1);

    // Writing the same name through the child must not touch the source.
    let mut writer = name.clone();
    writer.next("ada".into());
    assert_eq!(*source_hits.borrow(), 1);

    writer.next("grace".into());
    assert_eq!(source.peek().name, "grace");
    assert_eq!(*source_hits.borrow(), 2);
  }

  #[test]
  fn unsubscribing_projection_detaches_it() {
    let parent = LocalValueSubject::new(profile());
    let mut age = parent.project(|p| p.age, |p, v| p.age = v);
    age.unsubscribe();

    let mut writer = parent.clone();
    let mut updated = profile();
    updated.age = 99;
    writer.next(updated);
    assert_eq!(age.peek(), 36);
  }
}
