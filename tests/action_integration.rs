//! Integration tests for actions, functors and deferred triggering.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use flux_actions::prelude::*;
use pretty_assertions::assert_eq;

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_max_level(tracing::Level::TRACE)
    .with_test_writer()
    .try_init();
}

type Log = Rc<RefCell<Vec<Vec<i32>>>>;

/// Subscribes a recording listener to anything listenable.
fn record<L: Listenable<i32>>(source: &L) -> (Log, Subscription) {
  let log: Log = Rc::new(RefCell::new(vec![]));
  let c_log = log.clone();
  let subscription =
    source.listen(move |args: &[i32]| c_log.borrow_mut().push(args.to_vec())).unwrap();
  (log, subscription)
}

#[test]
fn end_to_end_save_action() {
  init_tracing();
  LocalScheduler::clear();

  let x: Action<i32> = Action::new().with_children(["save"]);
  let save = x.child("save").unwrap();
  let calls = Rc::new(RefCell::new(vec![]));
  let c_calls = calls.clone();
  let handle = save.listen(move |args: &[i32]| c_calls.borrow_mut().push(args.to_vec())).unwrap();

  save.as_function().invoke([42]);
  LocalScheduler::run_until_idle();
  assert_eq!(*calls.borrow(), vec![vec![42]]);

  handle.unsubscribe();
  save.as_function().invoke([99]);
  LocalScheduler::run_until_idle();
  assert_eq!(*calls.borrow(), vec![vec![42]]);
}

#[test]
fn n_triggers_give_n_ordered_invocations() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let (log, _subscription) = record(&action);

  for i in 0..5 {
    action.trigger([i]);
  }
  assert!(log.borrow().is_empty());
  assert_eq!(LocalScheduler::run_until_idle(), 5);
  assert_eq!(*log.borrow(), (0..5).map(|i| vec![i]).collect::<Vec<_>>());
}

#[test]
fn listen_once_across_two_triggers() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let hits = Rc::new(Cell::new(0));
  let c_hits = hits.clone();
  action.listen_once(move |_: &[i32]| c_hits.set(c_hits.get() + 1)).unwrap();

  action.trigger([1]);
  action.trigger([2]);
  LocalScheduler::run_until_idle();
  assert_eq!(hits.get(), 1);
  assert_eq!(action.listener_count(), 0);
}

#[test]
fn listen_once_unsubscribed_before_its_turn_never_fires() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let hits = Rc::new(Cell::new(0));
  let c_hits = hits.clone();
  let subscription = action.listen_once(move |_: &[i32]| c_hits.set(c_hits.get() + 1)).unwrap();

  action.trigger([1]);
  subscription.unsubscribe();
  LocalScheduler::run_until_idle();
  assert_eq!(hits.get(), 0);
}

#[test]
fn unsubscribe_between_trigger_and_turn() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let (log, subscription) = record(&action);
  let (other, _keep) = record(&action);

  action.trigger([7]);
  subscription.unsubscribe();
  LocalScheduler::run_until_idle();
  assert!(log.borrow().is_empty());
  assert_eq!(*other.borrow(), vec![vec![7]]);
}

#[test]
fn hooks_transform_and_filter_deferred_emissions() {
  LocalScheduler::clear();
  let seen_by_filter = Rc::new(RefCell::new(vec![]));
  let c_seen = seen_by_filter.clone();
  let hooks = HookSet::new()
    .with_pre_emit(|args: &[i32]| match args {
      [single] => PreEmit::replace([*single, *single * 10]),
      _ => PreEmit::Keep,
    })
    .with_should_emit(move |args: &[i32]| {
      c_seen.borrow_mut().push(args.to_vec());
      args.iter().all(|v| *v >= 0)
    });
  let action: Action<i32> = Action::builder().hooks(hooks).build();
  let (log, _subscription) = record(&action);

  action.trigger([1]);
  action.trigger([-1]);
  action.trigger([2, 3]);
  LocalScheduler::run_until_idle();

  assert_eq!(*seen_by_filter.borrow(), vec![vec![1, 10], vec![-1, -10], vec![2, 3]]);
  assert_eq!(*log.borrow(), vec![vec![1, 10], vec![2, 3]]);
}

#[test]
fn children_and_functor_tree() {
  LocalScheduler::clear();
  let existing: Action<i32> = Action::new();
  let x: Action<i32> = Action::new()
    .with_children([ChildEntry::from("save"), ChildEntry::from(("load", &existing))]);

  let names: Vec<String> = x.children().into_iter().map(|(name, _)| name).collect();
  assert_eq!(names, vec!["save".to_string(), "load".to_string()]);
  assert!(x.child("load").unwrap().ptr_eq(&existing));
  assert!(!x.child("save").unwrap().ptr_eq(&existing));

  let (loads, _subscription) = record(&existing);
  let functor = x.as_function();
  functor.path("load").unwrap().invoke([5]);
  functor["load"].invoke([6]);
  LocalScheduler::run_until_idle();
  assert_eq!(*loads.borrow(), vec![vec![5], vec![6]]);
}

#[test]
fn nested_functors_reach_grandchildren() {
  LocalScheduler::clear();
  let root: Action<i32> = Action::new().with_children(["profile"]);
  let profile = root.child("profile").unwrap().with_children(["update"]);

  let functor = root.as_function();
  let (updates, _subscription) = record(&functor["profile"]["update"]);
  functor.path("profile.update").unwrap().invoke([1]);
  LocalScheduler::run_until_idle();

  assert_eq!(*updates.borrow(), vec![vec![1]]);
  assert!(functor["profile"].action().ptr_eq(&profile));
}

#[test]
fn trigger_sync_bypasses_the_scheduler() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let (log, _subscription) = record(&action);
  action.trigger_sync([3]);
  assert_eq!(*log.borrow(), vec![vec![3]]);
  assert!(LocalScheduler::is_idle());
}

#[test]
fn re_entrant_trigger_runs_on_a_later_turn() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  let log = Rc::new(RefCell::new(vec![]));
  let c_log = log.clone();
  let c_action = action.clone();
  action
    .listen(move |args: &[i32]| {
      c_log.borrow_mut().push(args[0]);
      if args[0] < 3 {
        c_action.trigger([args[0] + 1]);
      }
    })
    .unwrap();

  action.trigger([0]);
  assert_eq!(LocalScheduler::run_until_idle(), 4);
  assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
}

#[test]
fn listener_panic_surfaces_on_the_scheduler_turn() {
  LocalScheduler::clear();
  let action: Action<i32> = Action::new();
  action.listen(|_: &[i32]| panic!("store failed")).unwrap();

  action.trigger([1]);
  let outcome = std::panic::catch_unwind(|| LocalScheduler::run_until_idle());
  assert!(outcome.is_err());
  assert!(LocalScheduler::is_idle());
}

#[test]
fn process_result_tracks_listener_outcomes() {
  LocalScheduler::clear();
  let collect = Collect::new();
  let action: Action<i32, Result<(), String>> = Action::builder().hooks(collect.clone()).build();
  action
    .listen(|args: &[i32]| if args[0] > 0 { Ok(()) } else { Err(format!("rejected {}", args[0])) })
    .unwrap();

  action.trigger([1]);
  action.trigger([0]);
  LocalScheduler::run_until_idle();
  assert_eq!(collect.take(), vec![Ok(()), Err("rejected 0".to_string())]);
}

#[test]
fn guard_unsubscribes_when_dropped() {
  let action: Action<i32> = Action::new();
  let (log, subscription) = record(&action);
  {
    let _guard = subscription.unsubscribe_when_dropped();
    action.trigger_sync([1]);
  }
  action.trigger_sync([2]);
  assert_eq!(*log.borrow(), vec![vec![1]]);
}

#[test]
fn named_handlers_may_be_missing() {
  let action: Action<i32> = Action::new();
  let mut handlers: std::collections::HashMap<&str, Callback<i32>> = Default::default();
  handlers.insert("onSave", Callback::from(|_: &[i32]| ()));

  assert!(action.listen(handlers.get("onSave").cloned().unwrap_or_default()).is_ok());
  let err = action.listen(handlers.get("onLoad").cloned().unwrap_or_default()).unwrap_err();
  assert_eq!(err.as_label(), "invalid_argument");
  assert_eq!(action.listener_count(), 1);
}

#[test]
fn futures_pool_as_scheduler() {
  use futures::executor::LocalPool;

  let mut pool = LocalPool::new();
  let action: Action<i32> = Action::builder()
    .scheduler(FuturesScheduler::new(pool.spawner()))
    .build()
    .with_children(["save"]);
  let (log, _subscription) = record(&action.as_function()["save"]);

  action.as_function()["save"].invoke([1]);
  action.as_function()["save"].invoke([2]);
  assert!(log.borrow().is_empty());
  pool.run_until_stalled();
  assert_eq!(*log.borrow(), vec![vec![1], vec![2]]);
}
