use rxbind::prelude::*;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn values_arrive_on_the_main_thread() {
  let mut main = MainLoop::new();
  let main_id = thread::current().id();
  let mut source = SharedSubject::<i32, Infallible>::new();
  let driver = source.clone().into_driver(main.handle());

  let log = Arc::new(Mutex::new(vec![]));
  let c_log = log.clone();
  let _s = driver.drive(move |v| {
    c_log.lock().unwrap().push((v, thread::current().id()))
  });

  let mut remote = source.clone();
  thread::spawn(move || {
    remote.next(1);
    remote.next(2);
  })
  .join()
  .unwrap();

  // Nothing is delivered until the main loop turns.
  assert!(log.lock().unwrap().is_empty());
  main.run_until_idle();

  let seen = log.lock().unwrap();
  let values: Vec<_> = seen.iter().map(|(v, _)| *v).collect();
  assert_eq!(values, vec![1, 2]);
  assert!(seen.iter().all(|(_, id)| *id == main_id));
}

#[test]
fn completion_lines_up_behind_queued_values() {
  let mut main = MainLoop::new();
  let mut source = SharedSubject::<i32, Infallible>::new();
  let driver = source.clone().into_driver(main.handle());

  let log = Arc::new(Mutex::new(vec![]));
  let c_log = log.clone();
  let c_log2 = log.clone();
  let _s = driver.drive_all(
    move |v| c_log.lock().unwrap().push(format!("next {v}")),
    move || c_log2.lock().unwrap().push("complete".into()),
  );

  let mut remote = source.clone();
  thread::spawn(move || {
    remote.next(1);
    remote.complete();
  })
  .join()
  .unwrap();

  main.run_until_idle();
  assert_eq!(*log.lock().unwrap(), vec!["next 1", "complete"]);
}

#[test]
fn cell_driven_onto_the_main_thread() {
  let mut main = MainLoop::new();
  let cell = SharedValueSubject::new(1);
  let driver = cell.clone().into_driver(main.handle());

  let log = Arc::new(Mutex::new(vec![]));
  let c_log = log.clone();
  let _s = driver.drive(move |v| c_log.lock().unwrap().push(v));

  // The current value replays inline when subscribing on the main thread.
  assert_eq!(*log.lock().unwrap(), vec![1]);

  let mut remote = cell.clone();
  thread::spawn(move || remote.next(2)).join().unwrap();
  main.run_until_idle();

  assert_eq!(*log.lock().unwrap(), vec![1, 2]);
  assert_eq!(cell.peek(), 2);
}

#[test]
fn mapped_and_deduplicated_pipeline() {
  let mut main = MainLoop::new();
  let cell = SharedValueSubject::new(5);
  let driver = cell
    .clone()
    .map(|v| v / 10)
    .distinct_until_changed()
    .into_driver(main.handle());

  let log = Arc::new(Mutex::new(vec![]));
  let c_log = log.clone();
  let _s = driver.drive(move |v| c_log.lock().unwrap().push(v));

  let mut writer = cell.clone();
  writer.next(11);
  writer.next(19);
  writer.next(25);
  main.run_until_idle();

  assert_eq!(*log.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn two_subscribers_share_and_replay() {
  let mut main = MainLoop::new();
  let mut source = SharedSubject::<i32, Infallible>::new();
  let driver = source.clone().into_driver(main.handle());

  let first = Arc::new(Mutex::new(vec![]));
  let second = Arc::new(Mutex::new(vec![]));
  let c_first = first.clone();
  let c_second = second.clone();

  let _a = driver.clone().drive(move |v| c_first.lock().unwrap().push(v));
  source.next(1);
  let _b = driver.clone().drive(move |v| c_second.lock().unwrap().push(v));
  source.next(2);
  main.run_until_idle();

  assert_eq!(*first.lock().unwrap(), vec![1, 2]);
  assert_eq!(*second.lock().unwrap(), vec![1, 2]);
}
