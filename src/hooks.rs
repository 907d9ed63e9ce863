//! Emission hooks.
//!
//! A publisher runs its hooks around every emission:
//!
//! 1. [`Hooks::pre_emit`] may replace the arguments,
//! 2. [`Hooks::should_emit`] may veto the emission,
//! 3. [`Hooks::process_result`] receives each listener's return value.
//!
//! Hooks are a strategy object handed to the publisher at construction time.
//! Implement [`Hooks`] on your own type, or assemble one from closures with
//! [`HookSet`].

use std::{
  cell::{Ref, RefCell},
  rc::Rc,
};

use smallvec::{smallvec, SmallVec};

/// The ordered argument sequence carried by one emission.
pub type Args<Item> = SmallVec<[Item; 4]>;

/// Outcome of [`Hooks::pre_emit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreEmit<Item> {
  /// Emit the original arguments.
  Keep,
  /// Emit these arguments instead, for `should_emit` and every listener.
  Replace(Args<Item>),
}

impl<Item> Default for PreEmit<Item> {
  fn default() -> Self { PreEmit::Keep }
}

impl<Item> PreEmit<Item> {
  /// Replaces the arguments with a single value.
  pub fn single(value: Item) -> Self { PreEmit::Replace(smallvec![value]) }

  /// Replaces the arguments with a sequence, used as-is.
  pub fn replace(values: impl IntoIterator<Item = Item>) -> Self {
    PreEmit::Replace(values.into_iter().collect())
  }
}

/// Extension points of a publisher. Every method has a neutral default.
pub trait Hooks<Item, R = ()> {
  /// Runs first on every emission.
  fn pre_emit(&self, _args: &[Item]) -> PreEmit<Item> { PreEmit::Keep }

  /// Runs after `pre_emit` with the (possibly replaced) arguments. Returning
  /// false suppresses the emission; `pre_emit` side effects stand.
  fn should_emit(&self, _args: &[Item]) -> bool { true }

  /// Receives the return value of every listener invocation.
  fn process_result(&self, _result: R) {}
}

/// Hooks with every default left in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHooks;

impl<Item, R> Hooks<Item, R> for DefaultHooks {}

type PreEmitFn<Item> = Box<dyn Fn(&[Item]) -> PreEmit<Item>>;
type ShouldEmitFn<Item> = Box<dyn Fn(&[Item]) -> bool>;
type ProcessResultFn<R> = Box<dyn Fn(R)>;

/// Hooks assembled from closures. Unset hooks keep their default.
///
/// ```rust
/// use flux_actions::prelude::*;
///
/// let hooks = HookSet::<i32>::new()
///   .with_pre_emit(|args| PreEmit::single(args.iter().sum()))
///   .with_should_emit(|args| args[0] > 0);
/// let publisher: Publisher<i32> = Publisher::builder().hooks(hooks).build();
/// # let _ = publisher;
/// ```
pub struct HookSet<Item, R = ()> {
  pre_emit: Option<PreEmitFn<Item>>,
  should_emit: Option<ShouldEmitFn<Item>>,
  process_result: Option<ProcessResultFn<R>>,
}

impl<Item, R> Default for HookSet<Item, R> {
  fn default() -> Self { Self { pre_emit: None, should_emit: None, process_result: None } }
}

impl<Item, R> HookSet<Item, R> {
  pub fn new() -> Self { Self::default() }

  pub fn with_pre_emit(mut self, f: impl Fn(&[Item]) -> PreEmit<Item> + 'static) -> Self {
    self.pre_emit = Some(Box::new(f));
    self
  }

  pub fn with_should_emit(mut self, f: impl Fn(&[Item]) -> bool + 'static) -> Self {
    self.should_emit = Some(Box::new(f));
    self
  }

  pub fn with_process_result(mut self, f: impl Fn(R) + 'static) -> Self {
    self.process_result = Some(Box::new(f));
    self
  }
}

impl<Item, R> Hooks<Item, R> for HookSet<Item, R> {
  fn pre_emit(&self, args: &[Item]) -> PreEmit<Item> {
    self.pre_emit.as_ref().map_or(PreEmit::Keep, |f| f(args))
  }

  fn should_emit(&self, args: &[Item]) -> bool { self.should_emit.as_ref().is_none_or(|f| f(args)) }

  fn process_result(&self, result: R) {
    if let Some(f) = &self.process_result {
      f(result);
    }
  }
}

/// Records every listener result, e.g. so a store can await or inspect work
/// its listeners started. Clones share the same record.
pub struct Collect<R> {
  results: Rc<RefCell<Vec<R>>>,
}

impl<R> Clone for Collect<R> {
  fn clone(&self) -> Self { Self { results: self.results.clone() } }
}

impl<R> Default for Collect<R> {
  fn default() -> Self { Self { results: Rc::new(RefCell::new(Vec::new())) } }
}

impl<R> Collect<R> {
  pub fn new() -> Self { Self::default() }

  pub fn results(&self) -> Ref<'_, Vec<R>> { self.results.borrow() }

  pub fn len(&self) -> usize { self.results.borrow().len() }

  pub fn is_empty(&self) -> bool { self.results.borrow().is_empty() }

  /// Takes the recorded results, leaving the record empty.
  pub fn take(&self) -> Vec<R> { std::mem::take(&mut *self.results.borrow_mut()) }
}

impl<Item, R> Hooks<Item, R> for Collect<R> {
  fn process_result(&self, result: R) { self.results.borrow_mut().push(result) }
}
