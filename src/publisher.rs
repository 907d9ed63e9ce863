//! The broadcast primitive underneath every action.
//!
//! A [`Publisher`] owns one [`EventBus`] channel and a set of [`Hooks`].
//! Listeners receive each emission as one ordered argument sequence
//! (`&[Item]`); whatever they return (`R`) is handed to
//! [`Hooks::process_result`].
//!
//! ```rust
//! use flux_actions::prelude::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let publisher: Publisher<&str> = Publisher::new();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! let subscription = publisher
//!   .listen(move |args: &[&str]| c_seen.borrow_mut().push(args.join(" ")))
//!   .unwrap();
//!
//! publisher.trigger_sync(["hello", "world"]);
//! subscription.unsubscribe();
//! publisher.trigger_sync(["ignored"]);
//!
//! assert_eq!(*seen.borrow(), vec!["hello world".to_string()]);
//! ```
//!
//! # Re-entrancy
//!
//! Listeners may subscribe, unsubscribe and trigger the same publisher while
//! an emission is running. A listener added during an emission first hears
//! the next one; a listener removed during an emission is skipped if it has
//! not run yet.

use std::{borrow::Cow, fmt::Debug, rc::Rc};

use crate::{
  bus::{EventBus, Handler},
  error::{Error, Result},
  hooks::{Args, DefaultHooks, Hooks, PreEmit},
  scheduler::{LocalScheduler, Scheduler},
  subscription::Subscription,
};

/// Label of the channel a publisher emits on unless configured otherwise.
pub const DEFAULT_EVENT_LABEL: &str = "event";

/// A listener as handed to `listen`/`listen_once`.
///
/// Any `Fn(&[Item]) -> R` converts into a callback. A callback may also be
/// empty, e.g. a handler looked up by name that does not exist; subscribing
/// with an empty callback fails with [`Error::InvalidArgument`].
pub struct Callback<Item, R = ()>(Option<Rc<dyn Fn(&[Item]) -> R>>);

impl<Item, R> Callback<Item, R> {
  /// A callback that refers to nothing.
  pub fn empty() -> Self { Callback(None) }

  pub fn is_empty(&self) -> bool { self.0.is_none() }
}

impl<Item, R> Default for Callback<Item, R> {
  fn default() -> Self { Self::empty() }
}

impl<Item, R> Clone for Callback<Item, R> {
  fn clone(&self) -> Self { Callback(self.0.clone()) }
}

impl<Item, R, F> From<F> for Callback<Item, R>
where
  F: Fn(&[Item]) -> R + 'static,
{
  fn from(f: F) -> Self { Callback(Some(Rc::new(f))) }
}

/// Anything a listener can subscribe to.
pub trait Listenable<Item, R = ()> {
  /// Calls `callback` on every emission until unsubscribed.
  fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription>;

  /// Calls `callback` on the next emission only.
  fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription>;
}

/// Anything that can be asked to broadcast.
pub trait Triggerable<Item> {
  /// Emits now, on the caller's stack.
  fn trigger_sync(&self, args: impl IntoIterator<Item = Item>);

  /// Emits on the next scheduler turn.
  fn trigger(&self, args: impl IntoIterator<Item = Item>);
}

/// Hook-driven broadcaster with synchronous and deferred triggering.
///
/// `Publisher` is a cheap handle: clones refer to the same channel, hooks and
/// scheduler. The bus is torn down when the last handle (including the one
/// captured by a pending `trigger`) is dropped.
pub struct Publisher<Item, R = ()> {
  inner: Rc<PublisherInner<Item, R>>,
}

struct PublisherInner<Item, R> {
  bus: Rc<EventBus<[Item]>>,
  label: Cow<'static, str>,
  hooks: Rc<dyn Hooks<Item, R>>,
  scheduler: Rc<dyn Scheduler>,
}

impl<Item, R> Clone for Publisher<Item, R> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<Item, R> Debug for Publisher<Item, R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Publisher")
      .field("label", &self.inner.label)
      .field("listeners", &self.inner.bus.listener_count(&self.inner.label))
      .finish()
  }
}

impl<Item: 'static, R: 'static> Default for Publisher<Item, R> {
  fn default() -> Self { Self::builder().build() }
}

impl<Item: 'static, R: 'static> Publisher<Item, R> {
  /// A publisher on the default label with default hooks, deferring onto
  /// [`LocalScheduler`].
  pub fn new() -> Self { Self::default() }

  pub fn builder() -> PublisherBuilder<Item, R> { PublisherBuilder::default() }

  pub fn event_label(&self) -> &str { &self.inner.label }

  /// Number of live subscriptions.
  pub fn listener_count(&self) -> usize { self.inner.bus.listener_count(&self.inner.label) }

  pub(crate) fn scheduler(&self) -> Rc<dyn Scheduler> { self.inner.scheduler.clone() }

  /// Subscribes `callback` to every future emission.
  ///
  /// Each invocation's return value goes to the `process_result` hook.
  pub fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.subscribe(callback.into(), false, "listen has to be given a valid callback function")
  }

  /// Subscribes `callback` to the next emission only.
  ///
  /// The subscription closes itself *before* `callback` runs, so triggering
  /// the publisher again from inside `callback` cannot reach it twice.
  pub fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.subscribe(callback.into(), true, "listen_once has to be given a valid callback function")
  }

  fn subscribe(
    &self, callback: Callback<Item, R>, once: bool, invalid: &'static str,
  ) -> Result<Subscription> {
    let Some(callback) = callback.0 else {
      return Err(Error::InvalidArgument(invalid));
    };

    let subscription = Subscription::new();
    let hooks = self.inner.hooks.clone();
    let abort = subscription.clone();
    let handler: Handler<[Item]> = Rc::new(move |args: &[Item]| {
      if abort.is_closed() {
        return;
      }
      if once {
        abort.unsubscribe();
      }
      hooks.process_result(callback(args));
    });

    let label = self.inner.label.clone();
    let id = self.inner.bus.register(label.clone(), handler);
    tracing::trace!(label = %label, id, once, "listener subscribed");

    let bus = Rc::downgrade(&self.inner.bus);
    subscription.set_teardown(move || {
      if let Some(bus) = bus.upgrade() {
        bus.deregister(&label, id);
      }
      tracing::trace!(label = %label, id, "listener unsubscribed");
    });
    Ok(subscription)
  }

  /// Runs the hooks and, unless `should_emit` vetoes, emits `args` to every
  /// current listener in subscription order before returning.
  pub fn trigger_sync(&self, args: impl IntoIterator<Item = Item>) {
    self.emit(args.into_iter().collect())
  }

  /// Defers [`trigger_sync`](Self::trigger_sync) with `args` to the next
  /// scheduler turn and returns immediately.
  ///
  /// Deferred emissions from one publisher keep the order of their `trigger`
  /// calls. A listener that panics does so on the scheduler's turn, not here.
  pub fn trigger(&self, args: impl IntoIterator<Item = Item>) {
    let args: Args<Item> = args.into_iter().collect();
    let this = self.clone();
    tracing::debug!(label = %self.inner.label, "trigger deferred to next turn");
    self.inner.scheduler.schedule(Box::new(move || this.emit(args)));
  }

  fn emit(&self, mut args: Args<Item>) {
    let hooks = &self.inner.hooks;
    if let PreEmit::Replace(replacement) = hooks.pre_emit(&args) {
      args = replacement;
    }
    if !hooks.should_emit(&args) {
      tracing::debug!(label = %self.inner.label, "emission suppressed by should_emit");
      return;
    }
    let reached = self.inner.bus.emit(&self.inner.label, &args);
    tracing::trace!(label = %self.inner.label, reached, "emitted");
  }
}

impl<Item: 'static, R: 'static> Listenable<Item, R> for Publisher<Item, R> {
  fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Publisher::listen(self, callback)
  }

  fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Publisher::listen_once(self, callback)
  }
}

impl<Item: 'static, R: 'static> Triggerable<Item> for Publisher<Item, R> {
  fn trigger_sync(&self, args: impl IntoIterator<Item = Item>) {
    Publisher::trigger_sync(self, args)
  }

  fn trigger(&self, args: impl IntoIterator<Item = Item>) { Publisher::trigger(self, args) }
}

/// Configures a [`Publisher`]: its channel label, hooks and scheduler.
pub struct PublisherBuilder<Item, R = ()> {
  label: Cow<'static, str>,
  hooks: Option<Rc<dyn Hooks<Item, R>>>,
  scheduler: Option<Rc<dyn Scheduler>>,
}

impl<Item, R> Default for PublisherBuilder<Item, R> {
  fn default() -> Self {
    Self { label: Cow::Borrowed(DEFAULT_EVENT_LABEL), hooks: None, scheduler: None }
  }
}

impl<Item: 'static, R: 'static> PublisherBuilder<Item, R> {
  pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
    self.label = label.into();
    self
  }

  pub fn hooks(mut self, hooks: impl Hooks<Item, R> + 'static) -> Self {
    self.hooks = Some(Rc::new(hooks));
    self
  }

  pub fn scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
    self.scheduler = Some(Rc::new(scheduler));
    self
  }

  pub(crate) fn shared_scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
    self.scheduler = Some(scheduler);
    self
  }

  pub fn build(self) -> Publisher<Item, R> {
    Publisher {
      inner: Rc::new(PublisherInner {
        bus: Rc::new(EventBus::new()),
        label: self.label,
        hooks: self.hooks.unwrap_or_else(|| Rc::new(DefaultHooks)),
        scheduler: self.scheduler.unwrap_or_else(|| Rc::new(LocalScheduler)),
      }),
    }
  }
}
