//! Thread-local FIFO run queue.
//!
//! Every [`LocalScheduler`] on a thread shares one queue, so tasks deferred by
//! different publishers interleave in the order they were scheduled. Nothing
//! runs until the owner of the thread drains the queue:
//!
//! ```rust
//! use flux_actions::prelude::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let publisher: Publisher<i32> = Publisher::new();
//! let seen = Rc::new(Cell::new(0));
//! let c_seen = seen.clone();
//! publisher.listen(move |args: &[i32]| c_seen.set(args[0])).unwrap();
//!
//! publisher.trigger([7]);
//! assert_eq!(seen.get(), 0);
//!
//! LocalScheduler::run_until_idle();
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! Each thread has its own queue, which keeps tests that run in parallel on
//! different threads isolated from each other.

use std::{cell::RefCell, collections::VecDeque};

use super::{Scheduler, Task};

thread_local! {
  static LOCAL_QUEUE: RefCell<VecDeque<Task>> = RefCell::new(VecDeque::new());
}

/// The default scheduler: a zero-sized handle onto the thread's run queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalScheduler;

impl LocalScheduler {
  /// Number of tasks waiting for a turn.
  pub fn pending_count() -> usize { LOCAL_QUEUE.with(|q| q.borrow().len()) }

  /// Whether the queue has quiesced.
  pub fn is_idle() -> bool { LOCAL_QUEUE.with(|q| q.borrow().is_empty()) }

  /// Runs the oldest pending task, if any.
  ///
  /// The task is popped before it runs, so it may schedule further work and a
  /// panic inside it leaves the queue usable.
  pub fn run_once() -> bool {
    let task = LOCAL_QUEUE.with(|q| q.borrow_mut().pop_front());
    match task {
      Some(task) => {
        task();
        true
      }
      None => false,
    }
  }

  /// Runs tasks until the queue is empty, including tasks scheduled while
  /// draining. Returns how many ran.
  pub fn run_until_idle() -> usize {
    let mut ran = 0;
    while Self::run_once() {
      ran += 1;
    }
    tracing::trace!(ran, "local scheduler idle");
    ran
  }

  /// Drops every pending task without running it. Returns how many were
  /// dropped.
  pub fn clear() -> usize {
    let dropped: Vec<Task> = LOCAL_QUEUE.with(|q| q.borrow_mut().drain(..).collect());
    dropped.len()
  }
}

impl Scheduler for LocalScheduler {
  fn schedule(&self, task: Task) { LOCAL_QUEUE.with(|q| q.borrow_mut().push_back(task)); }
}
