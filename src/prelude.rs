//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::{
  action::{Action, ActionBuilder, ChildEntry},
  error::Error,
  functor::Functor,
  hooks::{Args, Collect, DefaultHooks, HookSet, Hooks, PreEmit},
  publisher::{
    Callback, Listenable, Publisher, PublisherBuilder, Triggerable, DEFAULT_EVENT_LABEL,
  },
  scheduler::{FuturesScheduler, LocalScheduler, Scheduler, Task},
  subscription::{Subscription, SubscriptionGuard},
};
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioLocalScheduler;
