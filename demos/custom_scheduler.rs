//! Example: Custom Scheduler Injection
//!
//! This example defines a scheduler that logs every deferred task and keeps
//! them in its own queue, then builds a small action tree on top of it. The
//! application decides when a "turn" happens by draining the queue.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use flux_actions::prelude::*;

// ==================================================================================
// 1. Define the Custom Scheduler
// ==================================================================================

#[derive(Clone, Default)]
pub struct VerboseScheduler {
  queue: Rc<RefCell<VecDeque<Task>>>,
}

impl VerboseScheduler {
  /// Runs queued tasks until none are left, including tasks queued while
  /// draining.
  fn run_turns(&self) {
    let mut turn = 0;
    loop {
      let task = self.queue.borrow_mut().pop_front();
      let Some(task) = task else { break };
      turn += 1;
      println!("[VerboseScheduler] turn {turn}: running task");
      task();
    }
    println!("[VerboseScheduler] idle after {turn} turn(s)");
  }
}

// 2. Implement Scheduler
// Publishers hand every `trigger` to this method; it must not run the task
// right away.
impl Scheduler for VerboseScheduler {
  fn schedule(&self, task: Task) {
    let mut queue = self.queue.borrow_mut();
    queue.push_back(task);
    println!("[VerboseScheduler] queued task ({} pending)", queue.len());
  }
}

// ==================================================================================
// 3. Use it
// ==================================================================================

fn main() {
  let scheduler = VerboseScheduler::default();

  // Children created from bare names defer onto the parent's scheduler.
  let todo: Action<String> =
    Action::builder().scheduler(scheduler.clone()).build().with_children(["add", "clear"]);
  let actions = todo.as_function();

  let items = Rc::new(RefCell::new(Vec::<String>::new()));
  let c_items = items.clone();
  actions["add"]
    .listen(move |args: &[String]| {
      println!("[store] add {:?}", args);
      c_items.borrow_mut().extend_from_slice(args);
    })
    .expect("closure callbacks are never empty");

  let c_items = items.clone();
  actions["clear"]
    .listen_once(move |_: &[String]| {
      println!("[store] clear (once)");
      c_items.borrow_mut().clear();
    })
    .expect("closure callbacks are never empty");

  actions["add"].invoke(["buy milk".to_string()]);
  actions["add"].invoke(["write docs".to_string(), "ship it".to_string()]);
  println!("Before the turn: {:?}", items.borrow());

  scheduler.run_turns();
  println!("After the turn: {:?}", items.borrow());

  actions["clear"].invoke([]);
  actions["clear"].invoke([]);
  actions["add"].invoke(["again".to_string()]);
  scheduler.run_turns();
  println!("Final: {:?}", items.borrow());
}
