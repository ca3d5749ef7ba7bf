use crate::prelude::*;
use std::convert::Infallible;

/// Wraps a downstream observer so every event reaches it on the main
/// context.
///
/// Delivery is inline when the producer is already on the main context and
/// nothing for this observer is still queued; otherwise the event is posted
/// to the main queue. `pending` counts queued deliveries so an event can
/// never overtake one that was queued before it, and terminal events funnel
/// through the same queue.
pub struct MainObserver<O, SD> {
  core: MutArc<MainCore<O>>,
  scheduler: SD,
}

struct MainCore<O> {
  // `None` while the observer is out being called; `done` tells a
  // momentarily borrowed observer apart from a terminated one.
  observer: Option<O>,
  pending: usize,
  done: bool,
}

impl<O, SD> MainObserver<O, SD> {
  pub fn new(observer: O, scheduler: SD) -> Self {
    MainObserver {
      core: MutArc::own(MainCore {
        observer: Some(observer),
        pending: 0,
        done: false,
      }),
      scheduler,
    }
  }
}

impl<O, SD> Clone for MainObserver<O, SD>
where
  SD: Clone,
{
  fn clone(&self) -> Self {
    MainObserver {
      core: self.core.clone(),
      scheduler: self.scheduler.clone(),
    }
  }
}

fn deliver<O, T>(core: &MutArc<MainCore<O>>, value: T, call: impl FnOnce(&mut O, T)) {
  let mut c = core.rc_deref_mut();
  if c.done {
    return;
  }
  if let Some(mut observer) = c.observer.take() {
    drop(c);
    call(&mut observer, value);
    let mut c = core.rc_deref_mut();
    if c.observer.is_none() && !c.done {
      c.observer = Some(observer);
    }
  }
}

fn finish<O: Observer>(core: &MutArc<MainCore<O>>) {
  let mut c = core.rc_deref_mut();
  if c.done {
    return;
  }
  c.done = true;
  if let Some(mut observer) = c.observer.take() {
    drop(c);
    observer.complete();
  }
}

impl<O, SD> Observer for MainObserver<O, SD>
where
  O: Observer<Err = Infallible> + Send + 'static,
  O::Item: Send + 'static,
  SD: MainScheduler,
{
  type Item = O::Item;
  type Err = Infallible;

  fn next(&mut self, value: Self::Item) {
    let mut c = self.core.rc_deref_mut();
    if c.done {
      return;
    }
    if self.scheduler.is_main() && c.pending == 0 && c.observer.is_some() {
      drop(c);
      deliver(&self.core, value, |o, v| o.next(v));
    } else {
      c.pending += 1;
      drop(c);
      let core = self.core.clone();
      self.scheduler.post(Box::new(move || {
        core.rc_deref_mut().pending -= 1;
        deliver(&core, value, |o, v| o.next(v));
      }));
    }
  }

  fn error(&mut self, err: Infallible) { match err {} }

  fn complete(&mut self) {
    let mut c = self.core.rc_deref_mut();
    if c.done {
      return;
    }
    if self.scheduler.is_main() && c.pending == 0 && c.observer.is_some() {
      drop(c);
      finish(&self.core);
    } else {
      c.pending += 1;
      drop(c);
      let core = self.core.clone();
      self.scheduler.post(Box::new(move || {
        core.rc_deref_mut().pending -= 1;
        finish(&core);
      }));
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};
  use std::thread;

  fn recording() -> (Arc<Mutex<Vec<String>>>, impl Observer<Item = i32, Err = Infallible>) {
    let log = Arc::new(Mutex::new(vec![]));
    let c_log = log.clone();
    let observer = ObserverComp::new(
      move |v: i32| c_log.lock().unwrap().push(format!("next {v}")),
      {
        let c_log = log.clone();
        move || c_log.lock().unwrap().push("complete".to_string())
      },
    );
    (log, observer)
  }

  #[test]
  fn inline_on_main() {
    let mut main = MainLoop::new();
    let (log, observer) = recording();
    let mut target = MainObserver::new(observer, main.handle());
    target.next(1);
    target.next(2);
    assert_eq!(*log.lock().unwrap(), vec!["next 1", "next 2"]);
    assert_eq!(main.run_until_idle(), 0);
  }

  #[test]
  fn queued_from_other_thread() {
    let mut main = MainLoop::new();
    let (log, observer) = recording();
    let target = MainObserver::new(observer, main.handle());
    let mut remote = target.clone();
    thread::spawn(move || {
      remote.next(1);
      remote.next(2);
      remote.complete();
    })
    .join()
    .unwrap();
    assert!(log.lock().unwrap().is_empty());
    main.run_until_idle();
    assert_eq!(
      *log.lock().unwrap(),
      vec!["next 1", "next 2", "complete"]
    );
  }

  #[test]
  fn completion_waits_for_queued_values() {
    let mut main = MainLoop::new();
    let (log, observer) = recording();
    let target = MainObserver::new(observer, main.handle());
    let mut remote = target.clone();
    thread::spawn(move || remote.next(1)).join().unwrap();
    // Queue is non-empty, so even a main-thread complete must line up.
    let mut on_main = target.clone();
    on_main.complete();
    main.run_until_idle();
    assert_eq!(*log.lock().unwrap(), vec!["next 1", "complete"]);
  }

  #[test]
  fn nothing_after_complete() {
    let (log, observer) = recording();
    let mut target = MainObserver::new(observer, InlineScheduler);
    target.next(1);
    target.complete();
    target.next(2);
    target.complete();
    assert_eq!(*log.lock().unwrap(), vec!["next 1", "complete"]);
  }
}
