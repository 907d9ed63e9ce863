use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
  rc::Rc,
};

/// Handle returned by `listen`/`listen_once` to stop receiving events.
///
/// A subscription is either active or closed; closing is one-way. Clones
/// share the same state, so unsubscribing through any clone closes them all.
///
/// The abort flag is checked when the handler is *invoked*, not when an
/// emission is scheduled: unsubscribing after a `trigger` but before the
/// scheduler gets to it suppresses the call.
#[derive(Clone, Default)]
pub struct Subscription(Rc<Inner>);

#[derive(Default)]
struct Inner {
  closed: Cell<bool>,
  teardown: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Subscription {
  pub(crate) fn new() -> Self { Self::default() }

  /// Installs the action that deregisters the handler. Runs it right away if
  /// the subscription is already closed.
  pub(crate) fn set_teardown(&self, teardown: impl FnOnce() + 'static) {
    if self.is_closed() {
      teardown();
    } else {
      *self.0.teardown.borrow_mut() = Some(Box::new(teardown));
    }
  }

  /// Closes the subscription and removes its handler from the publisher.
  /// Calling it again has no effect.
  pub fn unsubscribe(&self) {
    if self.0.closed.replace(true) {
      return;
    }
    let teardown = self.0.teardown.borrow_mut().take();
    if let Some(teardown) = teardown {
      teardown();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.closed.get() }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard(self) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription").field("is_closed", &self.is_closed()).finish()
  }
}

/// Unsubscribes the wrapped subscription when it falls out of scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
  pub fn subscription(&self) -> &Subscription { &self.0 }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
