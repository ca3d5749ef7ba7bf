use crate::ops::{
  complete_on_error::CompleteOnErrorOp, error_recover::ErrorRecoverOp,
  error_return::ErrorReturnOp,
};
use crate::prelude::*;
use std::convert::Infallible;

/// A shared, replay-1, main-context stream.
///
/// All subscribers share one subscription to the source: the first
/// subscriber connects it, later ones join and immediately receive the
/// latest value. When the last subscriber leaves, the source subscription
/// is torn down and the buffer cleared, so the next subscriber restarts
/// the source cold. Every event is delivered on the main context of the
/// injected scheduler, and the stream cannot fail.
///
/// Subscribing to a driver from inside one of its own inline deliveries is
/// not supported.
pub struct Driver<S: Observable, SD> {
  source: S,
  scheduler: SD,
  core: MutArc<DriverCore<S::Item>>,
}

struct DriverCore<Item> {
  latest: Option<Item>,
  observers: Vec<Box<dyn Publisher<Item = Item, Err = Infallible> + Send>>,
  count: usize,
  connection: Option<Box<dyn SubscriptionLike + Send>>,
}

impl<Item> Default for DriverCore<Item> {
  fn default() -> Self {
    DriverCore {
      latest: None,
      observers: vec![],
      count: 0,
      connection: None,
    }
  }
}

impl<S: Observable, SD> Driver<S, SD> {
  pub fn new(source: S, scheduler: SD) -> Self {
    Driver {
      source,
      scheduler,
      core: MutArc::own(DriverCore::default()),
    }
  }
}

impl<S: Observable + Clone, SD: Clone> Clone for Driver<S, SD> {
  fn clone(&self) -> Self {
    Driver {
      source: self.source.clone(),
      scheduler: self.scheduler.clone(),
      core: self.core.clone(),
    }
  }
}

impl<S: Observable, SD> Observable for Driver<S, SD> {
  type Item = S::Item;
  type Err = Infallible;
}

impl<S, SD> SharedObservable for Driver<S, SD>
where
  S: SharedObservable<Err = Infallible> + Clone,
  S::Item: Clone + Send + 'static,
  SD: MainScheduler + Send + Sync + 'static,
{
  type Unsub = DriverSubscription<S::Item>;

  fn actual_subscribe<O>(self, observer: O) -> Self::Unsub
  where
    O: Observer<Item = S::Item, Err = Infallible> + Send + Sync + 'static,
  {
    let flag = MutArc::own(SingleSubscription::default());
    let mut entry = Subscriber::new(
      MainObserver::new(observer, self.scheduler.clone()),
      flag.clone(),
    );
    let connect = {
      let mut core = self.core.rc_deref_mut();
      // Replay and registration happen under one lock so no value can
      // slip between them.
      if let Some(latest) = core.latest.clone() {
        entry.next(latest);
      }
      core.observers.push(Box::new(entry));
      core.count += 1;
      core.count == 1 && core.connection.is_none()
    };
    if connect {
      // Connect outside the lock: the source may emit synchronously.
      let connection = self
        .source
        .clone()
        .actual_subscribe(DriverForward {
          core: self.core.clone(),
        });
      let leftover = {
        let mut core = self.core.rc_deref_mut();
        if core.count == 0 {
          // Everyone left (or the source finished) while connecting.
          Some(connection)
        } else {
          core.connection = Some(Box::new(connection));
          None
        }
      };
      if let Some(mut connection) = leftover {
        connection.unsubscribe();
      }
    }
    DriverSubscription {
      core: self.core,
      flag,
    }
  }
}

impl<S, SD> Driver<S, SD>
where
  S: SharedObservable<Err = Infallible> + Clone,
  S::Item: Clone + Send + 'static,
  SD: MainScheduler + Send + Sync + 'static,
{
  /// Subscribe with a value handler only.
  pub fn drive<N>(
    self,
    next: N,
  ) -> SubscriptionWrapper<DriverSubscription<S::Item>>
  where
    N: FnMut(S::Item) + Send + Sync + 'static,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverN::new(next)))
  }

  /// Subscribe with value and completion handlers.
  pub fn drive_all<N, C>(
    self,
    next: N,
    complete: C,
  ) -> SubscriptionWrapper<DriverSubscription<S::Item>>
  where
    N: FnMut(S::Item) + Send + Sync + 'static,
    C: FnMut() + Send + Sync + 'static,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverComp::new(next, complete)))
  }
}

/// Feeds the shared core from the single upstream subscription.
struct DriverForward<Item> {
  core: MutArc<DriverCore<Item>>,
}

impl<Item: Clone> Observer for DriverForward<Item> {
  type Item = Item;
  type Err = Infallible;

  fn next(&mut self, value: Item) {
    let mut core = self.core.rc_deref_mut();
    core.latest = Some(value.clone());
    core.observers.retain_mut(|o| {
      if o.is_closed() {
        false
      } else {
        o.next(value.clone());
        !o.is_closed()
      }
    });
  }

  fn error(&mut self, err: Infallible) { match err {} }

  fn complete(&mut self) {
    // Completion resets the share: the next subscriber restarts cold.
    let observers = {
      let mut core = self.core.rc_deref_mut();
      core.latest = None;
      core.count = 0;
      core.connection = None;
      std::mem::take(&mut core.observers)
    };
    for mut o in observers {
      o.complete();
    }
  }
}

/// One subscriber's handle on a [`Driver`]. Dropping the last one tears
/// down the shared upstream connection and clears the replay buffer.
pub struct DriverSubscription<Item> {
  core: MutArc<DriverCore<Item>>,
  flag: MutArc<SingleSubscription>,
}

impl<Item> Clone for DriverSubscription<Item> {
  fn clone(&self) -> Self {
    DriverSubscription {
      core: self.core.clone(),
      flag: self.flag.clone(),
    }
  }
}

impl<Item> SubscriptionLike for DriverSubscription<Item> {
  fn unsubscribe(&mut self) {
    if self.flag.is_closed() {
      return;
    }
    self.flag.unsubscribe();
    let connection = {
      let mut core = self.core.rc_deref_mut();
      if core.count > 0 {
        core.count -= 1;
      }
      if core.count == 0 {
        core.observers.clear();
        core.latest = None;
        core.connection.take()
      } else {
        None
      }
    };
    if let Some(mut connection) = connection {
      connection.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.flag.is_closed() }
}

/// Entry points turning fallible shared streams into drivers.
pub trait IntoDriver: SharedObservable + Sized {
  /// Wrap an already infallible stream.
  #[inline]
  fn into_driver<SD>(self, scheduler: SD) -> Driver<Self, SD>
  where
    Self: SharedObservable<Err = Infallible>,
  {
    Driver::new(self, scheduler)
  }

  /// Failures end the stream silently, as completion.
  #[inline]
  fn driver_on_error_complete<SD>(
    self,
    scheduler: SD,
  ) -> Driver<CompleteOnErrorOp<Self>, SD> {
    Driver::new(self.complete_on_error(), scheduler)
  }

  /// A failure is replaced by one final `default` value, then completion.
  #[inline]
  fn driver_on_error_return<SD>(
    self,
    scheduler: SD,
    default: Self::Item,
  ) -> Driver<ErrorReturnOp<Self>, SD> {
    Driver::new(self.error_return(default), scheduler)
  }

  /// A failure switches to the stream produced by `recover`; its own
  /// failures are downgraded to completion.
  #[inline]
  fn driver_on_error_recover<SD, F, R>(
    self,
    scheduler: SD,
    recover: F,
  ) -> Driver<ErrorRecoverOp<Self, F>, SD>
  where
    F: FnMut(Self::Err) -> R,
    R: Observable<Item = Self::Item>,
  {
    Driver::new(self.error_recover(recover), scheduler)
  }
}

impl<T: SharedObservable + Sized> IntoDriver for T {}
