//! Label-keyed FIFO event bus.
//!
//! Each [`Publisher`](crate::publisher::Publisher) owns exactly one bus and
//! talks to it through `register`, `deregister` and `emit`. Handlers are
//! reference counted so that `emit` can take a snapshot of the channel and
//! release its borrow before fanning out; handlers are therefore free to
//! register, deregister or emit on the same bus while they run.

use std::{borrow::Cow, cell::RefCell, collections::HashMap, rc::Rc};

use smallvec::SmallVec;

mod handlers;

use handlers::Handlers;

/// A registered event handler receiving a borrowed payload.
pub type Handler<P> = Rc<dyn Fn(&P)>;

/// Fans a payload out to every handler registered under a label.
pub struct EventBus<P: ?Sized> {
  channels: RefCell<HashMap<Cow<'static, str>, Handlers<Handler<P>>>>,
}

impl<P: ?Sized> Default for EventBus<P> {
  fn default() -> Self { Self { channels: RefCell::new(HashMap::new()) } }
}

impl<P: ?Sized> EventBus<P> {
  pub fn new() -> Self { Self::default() }

  /// Adds `handler` to the end of `label`'s channel and returns its id.
  /// Ids are unique per label.
  pub fn register(&self, label: impl Into<Cow<'static, str>>, handler: Handler<P>) -> usize {
    self.channels.borrow_mut().entry(label.into()).or_default().add(handler)
  }

  /// Removes the handler with `id` from `label`. Returns whether it was
  /// present.
  pub fn deregister(&self, label: &str, id: usize) -> bool {
    self.channels.borrow_mut().get_mut(label).and_then(|handlers| handlers.remove(id)).is_some()
  }

  /// Number of handlers currently registered under `label`.
  pub fn listener_count(&self, label: &str) -> usize {
    self.channels.borrow().get(label).map_or(0, Handlers::len)
  }

  /// Calls every handler registered under `label` at the moment of the call,
  /// first-registered first. Returns how many handlers were called.
  ///
  /// Handlers registered while the emission is running do not see it.
  pub fn emit(&self, label: &str, payload: &P) -> usize {
    let snapshot: SmallVec<[Handler<P>; 4]> = match self.channels.borrow().get(label) {
      Some(handlers) => handlers.iter().cloned().collect(),
      None => return 0,
    };
    for handler in &snapshot {
      handler(payload);
    }
    snapshot.len()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::{Cell, RefCell};

  use super::*;

  fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Handler<str> {
    let log = log.clone();
    Rc::new(move |payload: &str| log.borrow_mut().push(format!("{tag}:{payload}")))
  }

  #[test]
  fn fan_out_in_registration_order() {
    let bus = EventBus::<str>::new();
    let log = Rc::new(RefCell::new(vec![]));
    bus.register("event", recorder(&log, "a"));
    bus.register("event", recorder(&log, "b"));
    bus.register("other", recorder(&log, "c"));

    assert_eq!(bus.emit("event", "x"), 2);
    assert_eq!(*log.borrow(), vec!["a:x", "b:x"]);
    assert_eq!(bus.emit("missing", "x"), 0);
  }

  #[test]
  fn deregister_removes_only_that_handler() {
    let bus = EventBus::<str>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let a = bus.register("event", recorder(&log, "a"));
    bus.register("event", recorder(&log, "b"));

    assert!(bus.deregister("event", a));
    assert!(!bus.deregister("event", a));
    assert!(!bus.deregister("other", a));
    assert_eq!(bus.listener_count("event"), 1);

    bus.emit("event", "y");
    assert_eq!(*log.borrow(), vec!["b:y"]);
  }

  #[test]
  fn handlers_may_mutate_the_bus_while_emitting() {
    let bus = Rc::new(EventBus::<str>::new());
    let log = Rc::new(RefCell::new(vec![]));
    let registered = Rc::new(Cell::new(false));

    let c_bus = Rc::downgrade(&bus);
    let c_log = log.clone();
    let c_registered = registered.clone();
    bus.register(
      "event",
      Rc::new(move |payload: &str| {
        if !c_registered.replace(true) {
          if let Some(bus) = c_bus.upgrade() {
            bus.register("event", recorder(&c_log, "late"));
          }
        }
        c_log.borrow_mut().push(format!("first:{payload}"));
      }),
    );

    assert_eq!(bus.emit("event", "1"), 1);
    assert_eq!(bus.emit("event", "2"), 2);
    assert_eq!(*log.borrow(), vec!["first:1", "first:2", "late:2"]);
  }
}
