//! Actions: publishers arranged into a named tree.
//!
//! An [`Action`] is a [`Publisher`] with a registry of named children. Bind
//! children with [`Action::with_children`], then hand out
//! [`Functor`](crate::functor::Functor)s, callable snapshots of the tree:
//!
//! ```rust
//! use flux_actions::prelude::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let shared: Action<i32> = Action::new();
//! let root: Action<i32> = Action::new()
//!   .with_children([ChildEntry::from("save"), ChildEntry::from(("load", &shared))]);
//!
//! let saved = Rc::new(RefCell::new(vec![]));
//! let c_saved = saved.clone();
//! root
//!   .child("save")
//!   .unwrap()
//!   .listen(move |args: &[i32]| c_saved.borrow_mut().extend_from_slice(args))
//!   .unwrap();
//!
//! let actions = root.as_function();
//! actions["save"].invoke([42]);
//! LocalScheduler::run_until_idle();
//!
//! assert_eq!(*saved.borrow(), vec![42]);
//! assert!(root.child("load").unwrap().ptr_eq(&shared));
//! ```

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use crate::{
  error::Result,
  functor::Functor,
  hooks::Hooks,
  publisher::{Callback, Listenable, Publisher, PublisherBuilder, Triggerable},
  scheduler::Scheduler,
  subscription::Subscription,
};

type Children<Item, R> = Rc<RefCell<Vec<(String, Action<Item, R>)>>>;

/// One entry for [`Action::with_children`].
pub enum ChildEntry<Item, R = ()> {
  /// Create a fresh child action under this name.
  New(String),
  /// Bind an existing action under this name; the same action may be the
  /// child of several parents.
  Existing(String, Action<Item, R>),
}

impl<Item, R> From<&str> for ChildEntry<Item, R> {
  fn from(name: &str) -> Self { ChildEntry::New(name.to_owned()) }
}

impl<Item, R> From<String> for ChildEntry<Item, R> {
  fn from(name: String) -> Self { ChildEntry::New(name) }
}

impl<Item, R> From<(&str, Action<Item, R>)> for ChildEntry<Item, R> {
  fn from((name, action): (&str, Action<Item, R>)) -> Self {
    ChildEntry::Existing(name.to_owned(), action)
  }
}

impl<Item, R> From<(&str, &Action<Item, R>)> for ChildEntry<Item, R> {
  fn from((name, action): (&str, &Action<Item, R>)) -> Self {
    ChildEntry::Existing(name.to_owned(), action.clone())
  }
}

impl<Item, R> From<(String, Action<Item, R>)> for ChildEntry<Item, R> {
  fn from((name, action): (String, Action<Item, R>)) -> Self { ChildEntry::Existing(name, action) }
}

/// A publisher with named children and functor construction.
///
/// `Action` is a handle: clones share the publisher and the children
/// registry. Children are only ever added. Binding an action as its own
/// descendant creates a cycle that `create_functor` cannot terminate on.
pub struct Action<Item, R = ()> {
  publisher: Publisher<Item, R>,
  children: Children<Item, R>,
}

impl<Item, R> Clone for Action<Item, R> {
  fn clone(&self) -> Self {
    Self { publisher: self.publisher.clone(), children: self.children.clone() }
  }
}

impl<Item, R> Debug for Action<Item, R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let names: Vec<String> = self.children.borrow().iter().map(|(name, _)| name.clone()).collect();
    f.debug_struct("Action").field("publisher", &self.publisher).field("children", &names).finish()
  }
}

impl<Item: 'static, R: 'static> Default for Action<Item, R> {
  fn default() -> Self { Self::from_publisher(Publisher::new()) }
}

impl<Item: 'static, R: 'static> Action<Item, R> {
  pub fn new() -> Self { Self::default() }

  pub fn builder() -> ActionBuilder<Item, R> { ActionBuilder { publisher: Publisher::builder() } }

  fn from_publisher(publisher: Publisher<Item, R>) -> Self {
    Self { publisher, children: Rc::new(RefCell::new(Vec::new())) }
  }

  /// The publisher this action broadcasts through.
  pub fn publisher(&self) -> &Publisher<Item, R> { &self.publisher }

  /// Whether both handles refer to the same action.
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.children, &other.children) }

  /// Binds children and returns `self` for chaining.
  ///
  /// Bare names get a fresh action with default hooks and label that defers
  /// onto this action's scheduler. Any string is a valid name, including the
  /// empty one. Rebinding a name replaces the earlier child.
  pub fn with_children<E>(self, entries: impl IntoIterator<Item = E>) -> Self
  where
    E: Into<ChildEntry<Item, R>>,
  {
    for entry in entries {
      let (name, child) = match entry.into() {
        ChildEntry::New(name) => {
          let publisher = Publisher::builder().shared_scheduler(self.publisher.scheduler()).build();
          (name, Action::from_publisher(publisher))
        }
        ChildEntry::Existing(name, action) => (name, action),
      };
      self.bind(name, child);
    }
    self
  }

  fn bind(&self, name: String, child: Action<Item, R>) {
    let mut children = self.children.borrow_mut();
    match children.iter_mut().find(|(bound, _)| *bound == name) {
      Some((_, slot)) => {
        tracing::warn!(child = %name, "child action rebound; the earlier binding is replaced");
        *slot = child;
      }
      None => children.push((name, child)),
    }
  }

  /// The child bound under `name`.
  pub fn child(&self, name: &str) -> Option<Action<Item, R>> {
    self.children.borrow().iter().find(|(bound, _)| bound == name).map(|(_, child)| child.clone())
  }

  /// Names and children in binding order.
  pub fn children(&self) -> Vec<(String, Action<Item, R>)> { self.children.borrow().clone() }

  pub fn child_names(&self) -> Vec<String> {
    self.children.borrow().iter().map(|(name, _)| name.clone()).collect()
  }

  /// Builds a fresh functor over this action and, recursively, all of its
  /// children. Nothing is cached: two calls give two independent graphs.
  pub fn create_functor(&self) -> Functor<Item, R> {
    let children = self
      .children
      .borrow()
      .iter()
      .map(|(name, child)| (name.clone(), child.create_functor()))
      .collect();
    Functor::new(self.clone(), children)
  }

  /// Same as [`create_functor`](Self::create_functor); every call builds a
  /// new graph.
  pub fn as_function(&self) -> Functor<Item, R> { self.create_functor() }

  pub fn event_label(&self) -> &str { self.publisher.event_label() }

  pub fn listener_count(&self) -> usize { self.publisher.listener_count() }

  pub fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.publisher.listen(callback)
  }

  pub fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.publisher.listen_once(callback)
  }

  pub fn trigger_sync(&self, args: impl IntoIterator<Item = Item>) {
    self.publisher.trigger_sync(args)
  }

  pub fn trigger(&self, args: impl IntoIterator<Item = Item>) { self.publisher.trigger(args) }
}

impl<Item: 'static, R: 'static> Listenable<Item, R> for Action<Item, R> {
  fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Action::listen(self, callback)
  }

  fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Action::listen_once(self, callback)
  }
}

impl<Item: 'static, R: 'static> Triggerable<Item> for Action<Item, R> {
  fn trigger_sync(&self, args: impl IntoIterator<Item = Item>) { Action::trigger_sync(self, args) }

  fn trigger(&self, args: impl IntoIterator<Item = Item>) { Action::trigger(self, args) }
}

/// Configures the publisher behind a new [`Action`].
pub struct ActionBuilder<Item, R = ()> {
  publisher: PublisherBuilder<Item, R>,
}

impl<Item: 'static, R: 'static> ActionBuilder<Item, R> {
  pub fn label(self, label: impl Into<std::borrow::Cow<'static, str>>) -> Self {
    Self { publisher: self.publisher.label(label) }
  }

  pub fn hooks(self, hooks: impl Hooks<Item, R> + 'static) -> Self {
    Self { publisher: self.publisher.hooks(hooks) }
  }

  pub fn scheduler(self, scheduler: impl Scheduler + 'static) -> Self {
    Self { publisher: self.publisher.scheduler(scheduler) }
  }

  pub fn build(self) -> Action<Item, R> { Action::from_publisher(self.publisher.build()) }
}
