use futures::task::{LocalSpawn, LocalSpawnExt};

use super::{Scheduler, Task};

/// Defers tasks onto a `futures` local executor.
///
/// Each task is spawned as its own future, so it runs when the executor is
/// next polled, e.g. by `LocalPool::run_until_stalled`.
#[derive(Clone, Debug)]
pub struct FuturesScheduler<S> {
  spawner: S,
}

impl<S: LocalSpawn> FuturesScheduler<S> {
  pub fn new(spawner: S) -> Self { Self { spawner } }
}

impl<S: LocalSpawn> Scheduler for FuturesScheduler<S> {
  fn schedule(&self, task: Task) {
    if let Err(err) = self.spawner.spawn_local(async move { task() }) {
      tracing::warn!(error = %err, "executor is shut down; deferred task dropped");
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use futures::executor::LocalPool;

  use super::*;

  #[test]
  fn runs_on_the_pool_in_order() {
    let mut pool = LocalPool::new();
    let scheduler = FuturesScheduler::new(pool.spawner());
    let order = Rc::new(RefCell::new(vec![]));
    for i in 0..3 {
      let c_order = order.clone();
      scheduler.schedule(Box::new(move || c_order.borrow_mut().push(i)));
    }

    assert!(order.borrow().is_empty());
    pool.run_until_stalled();
    assert_eq!(*order.borrow(), vec![0, 1, 2]);
  }
}
