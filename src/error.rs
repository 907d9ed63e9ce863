//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors produced while wiring publishers, actions and functors together.
///
/// Nothing that happens *during* an emission is reported here: a panicking
/// listener unwinds out of the emission call, and fallible listeners hand
/// their `Result` to the publisher's `process_result` hook instead.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// A subscription was requested with an empty [`Callback`].
  ///
  /// [`Callback`]: crate::publisher::Callback
  #[error("invalid argument: {0}")]
  InvalidArgument(&'static str),

  /// A dotted functor path named a child that does not exist.
  #[error("no child action along path `{0}`")]
  UnknownChild(String),
}

impl Error {
  /// Returns a short stable label (snake_case) for use in logs.
  pub fn as_label(&self) -> &'static str {
    match self {
      Error::InvalidArgument(_) => "invalid_argument",
      Error::UnknownChild(_) => "unknown_child",
    }
  }
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;
