use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use once_cell::sync::OnceCell;
use std::thread::{self, ThreadId};

pub type MainTask = Box<dyn FnOnce() + Send>;

/// The capability a driver needs from its host: tell whether the caller is
/// already on the main context, and enqueue work onto it.
///
/// This is injected rather than derived from a global thread check, so
/// hosts and tests can decide what "main" means.
pub trait MainScheduler: Clone {
  fn is_main(&self) -> bool;
  fn post(&self, task: MainTask);
}

/// Owns the main-context task queue. Create it on the thread that plays the
/// main role and pump it there; hand out [`MainHandle`]s to producers.
///
/// The queue is a single FIFO, so everything posted from anywhere runs on
/// the owning thread in post order.
pub struct MainLoop {
  tasks: UnboundedReceiver<MainTask>,
  handle: MainHandle,
}

#[derive(Clone)]
pub struct MainHandle {
  thread: ThreadId,
  sender: UnboundedSender<MainTask>,
}

impl MainLoop {
  pub fn new() -> Self {
    let (sender, tasks) = mpsc::unbounded();
    MainLoop {
      tasks,
      handle: MainHandle {
        thread: thread::current().id(),
        sender,
      },
    }
  }

  #[inline]
  pub fn handle(&self) -> MainHandle { self.handle.clone() }

  /// Run every task queued so far, in FIFO order, and return how many ran.
  /// Tasks posted while pumping are run too.
  pub fn run_until_idle(&mut self) -> usize {
    let mut ran = 0;
    loop {
      match self.tasks.try_next() {
        Ok(Some(task)) => {
          task();
          ran += 1;
        }
        // Ok(None) means every sender is gone, Err means merely empty.
        Ok(None) => break,
        Err(_) => break,
      }
    }
    ran
  }
}

impl Default for MainLoop {
  fn default() -> Self { Self::new() }
}

static GLOBAL_MAIN: OnceCell<MainHandle> = OnceCell::new();

impl MainHandle {
  /// Register this handle as the process-wide main context, for hosts with
  /// exactly one UI thread. Fails if one is already installed.
  pub fn install_global(self) -> Result<(), MainHandle> {
    GLOBAL_MAIN.set(self)
  }

  pub fn global() -> Option<MainHandle> { GLOBAL_MAIN.get().cloned() }
}

impl MainScheduler for MainHandle {
  #[inline]
  fn is_main(&self) -> bool { thread::current().id() == self.thread }

  fn post(&self, task: MainTask) {
    // The receiver being gone just drops the task.
    let _ = self.sender.unbounded_send(task);
  }
}

/// A scheduler that claims every thread is main and runs posted tasks in
/// place. Useful in tests and in hosts without a thread-affine UI.
#[derive(Clone, Copy, Default)]
pub struct InlineScheduler;

impl MainScheduler for InlineScheduler {
  #[inline]
  fn is_main(&self) -> bool { true }

  #[inline]
  fn post(&self, task: MainTask) { task() }
}
