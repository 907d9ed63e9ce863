//! Callable snapshots of an action tree.
//!
//! A [`Functor`] mirrors the shape of the [`Action`] it was built from at the
//! moment [`Action::create_functor`] ran: one nested functor per child, under
//! the same name. Invoking a functor triggers its action on the next
//! scheduler turn. Functors are never cached, so comparing two of them says
//! nothing; compare their [`action`](Functor::action)s with
//! [`Action::ptr_eq`] instead.

use std::{fmt::Debug, ops::Index};

use crate::{
  action::Action,
  error::{Error, Result},
  publisher::{Callback, Listenable, Triggerable},
  subscription::Subscription,
};

/// Invokable view of an action with named sub-functors.
pub struct Functor<Item, R = ()> {
  action: Action<Item, R>,
  children: Vec<(String, Functor<Item, R>)>,
}

impl<Item, R> Debug for Functor<Item, R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Functor").field("action", &self.action).finish_non_exhaustive()
  }
}

impl<Item: 'static, R: 'static> Functor<Item, R> {
  pub(crate) fn new(action: Action<Item, R>, children: Vec<(String, Functor<Item, R>)>) -> Self {
    Self { action, children }
  }

  /// Always true; marks the value as built by an action.
  pub const fn is_action_functor(&self) -> bool { true }

  /// The action this functor was built from.
  pub fn action(&self) -> &Action<Item, R> { &self.action }

  /// Triggers the action with `args` on the next scheduler turn.
  pub fn invoke(&self, args: impl IntoIterator<Item = Item>) { self.action.trigger(args) }

  pub fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.action.listen(callback)
  }

  pub fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    self.action.listen_once(callback)
  }

  pub fn child(&self, name: &str) -> Option<&Functor<Item, R>> {
    self.children.iter().find(|(bound, _)| bound == name).map(|(_, functor)| functor)
  }

  pub fn children(&self) -> impl Iterator<Item = (&str, &Functor<Item, R>)> {
    self.children.iter().map(|(name, functor)| (name.as_str(), functor))
  }

  /// Walks a dotted path such as `"save.load"` down the nested functors.
  pub fn path(&self, path: &str) -> Result<&Functor<Item, R>> {
    path
      .split('.')
      .try_fold(self, |functor, segment| {
        functor.child(segment).ok_or_else(|| Error::UnknownChild(path.to_owned()))
      })
  }
}

impl<Item: 'static, R: 'static> Index<&str> for Functor<Item, R> {
  type Output = Functor<Item, R>;

  /// # Panics
  ///
  /// Panics if there is no child functor named `name`.
  fn index(&self, name: &str) -> &Self::Output {
    match self.child(name) {
      Some(functor) => functor,
      None => panic!("no child functor named `{name}`"),
    }
  }
}

impl<Item: 'static, R: 'static> Listenable<Item, R> for Functor<Item, R> {
  fn listen(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Functor::listen(self, callback)
  }

  fn listen_once(&self, callback: impl Into<Callback<Item, R>>) -> Result<Subscription> {
    Functor::listen_once(self, callback)
  }
}

impl<Item: 'static, R: 'static> Triggerable<Item> for Functor<Item, R> {
  fn trigger_sync(&self, args: impl IntoIterator<Item = Item>) { self.action.trigger_sync(args) }

  fn trigger(&self, args: impl IntoIterator<Item = Item>) { self.invoke(args) }
}
