//! Next-turn task scheduling.
//!
//! [`Publisher::trigger`](crate::publisher::Publisher::trigger) never emits
//! on the caller's stack; it hands a [`Task`] to a [`Scheduler`] which runs it
//! once the current synchronous work has unwound. All schedulers here are
//! single-threaded and preserve FIFO order among the tasks they receive.
//!
//! | Scheduler | Drained by |
//! |-----------|------------|
//! | [`LocalScheduler`] (default) | [`LocalScheduler::run_until_idle`] |
//! | [`FuturesScheduler`] | a `futures` local executor, e.g. `LocalPool` |
//! | `TokioLocalScheduler` (`tokio-scheduler`) | a `tokio::task::LocalSet` |

use std::rc::Rc;

mod futures_scheduler;
mod local_scheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

pub use futures_scheduler::FuturesScheduler;
pub use local_scheduler::LocalScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Orders deferred tasks and runs them on a later turn.
///
/// Implementations must not run `task` before `schedule` returns, and must
/// run tasks in the order they were scheduled.
pub trait Scheduler {
  fn schedule(&self, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
  #[inline]
  fn schedule(&self, task: Task) { (**self).schedule(task) }
}
