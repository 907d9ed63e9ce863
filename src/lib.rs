//! # flux-actions: listenable, composable actions
//!
//! The publish/subscribe core of a Flux-style architecture: application code
//! calls *actions*, *stores* listen to them.
//!
//! ```rust
//! use flux_actions::prelude::*;
//! use std::{cell::RefCell, rc::Rc};
//!
//! let todo: Action<String> = Action::new().with_children(["add", "remove"]);
//!
//! // A store reacting to `todo.add`.
//! let items = Rc::new(RefCell::new(Vec::new()));
//! let c_items = items.clone();
//! let actions = todo.as_function();
//! actions["add"]
//!   .listen(move |args: &[String]| c_items.borrow_mut().extend_from_slice(args))
//!   .unwrap();
//!
//! // Triggering is deferred to the next turn of the scheduler.
//! actions["add"].invoke(["write docs".to_string()]);
//! assert!(items.borrow().is_empty());
//!
//! LocalScheduler::run_until_idle();
//! assert_eq!(*items.borrow(), vec!["write docs".to_string()]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Publisher`] | Owns an event channel, runs [`Hooks`] around each emission |
//! | [`Action`] | A publisher with named child actions |
//! | [`Functor`] | Callable snapshot of an action tree |
//! | [`Subscription`] | Idempotent handle to stop listening |
//! | [`Scheduler`] | Runs deferred `trigger`s on a later turn |
//!
//! Everything is single-threaded: handles are `Rc`-based and `!Send`.
//!
//! ## Feature Flags
//!
//! - **`tokio-scheduler`**: `TokioLocalScheduler`, deferring onto a
//!   `tokio::task::LocalSet`
//!
//! [`Publisher`]: publisher::Publisher
//! [`Hooks`]: hooks::Hooks
//! [`Action`]: action::Action
//! [`Functor`]: functor::Functor
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

pub mod action;
pub mod bus;
pub mod error;
pub mod functor;
pub mod hooks;
pub mod prelude;
pub mod publisher;
pub mod scheduler;
pub mod subscription;

pub use prelude::*;
