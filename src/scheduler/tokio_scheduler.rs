use super::{Scheduler, Task};

/// Defers tasks onto the current `tokio::task::LocalSet`.
///
/// Scheduling panics when called outside a `LocalSet`, as
/// `tokio::task::spawn_local` does.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioLocalScheduler;

impl Scheduler for TokioLocalScheduler {
  fn schedule(&self, task: Task) {
    // Detached: the handle is dropped, the task still runs.
    let _handle = tokio::task::spawn_local(async move { task() });
  }
}
