//! Error signals delivered on the subscriber channel.
//!
//! Nothing in this crate returns these errors to the caller of `request`,
//! `cancel` or `subscribe`; every fault is converted into exactly one
//! `on_error` signal instead.

use std::{error::Error as StdError, sync::Arc};

use thiserror::Error;

/// Shorthand for results carrying a [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A terminal failure observed by a [`Subscriber`](crate::subscriber::Subscriber).
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum Error {
  /// `request` was called with a non-positive amount.
  #[error("demand must be positive, got {requested}")]
  InvalidDemand {
    /// The rejected amount.
    requested: i64,
  },

  /// The source sequence holds no element at `index`.
  #[error("source element at index {index} is missing")]
  MissingElement {
    /// Position of the missing slot.
    index: usize,
  },

  /// Failure supplied by whoever built the publisher.
  #[error("upstream failure: {0}")]
  Upstream(#[source] Arc<dyn StdError + Send + Sync>),
}

impl Error {
  /// Wraps an arbitrary failure as an [`Error::Upstream`].
  ///
  /// # Example
  /// ```
  /// use fountain::Error;
  ///
  /// let err = Error::upstream(std::io::Error::other("disk on fire"));
  /// assert_eq!(err.as_label(), "upstream");
  /// assert_eq!(err.to_string(), "upstream failure: disk on fire");
  /// ```
  pub fn upstream<E>(err: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    Error::Upstream(Arc::new(err))
  }

  /// Returns a short stable label (snake_case) for use in logs.
  pub fn as_label(&self) -> &'static str {
    match self {
      Error::InvalidDemand { .. } => "invalid_demand",
      Error::MissingElement { .. } => "missing_element",
      Error::Upstream(_) => "upstream",
    }
  }

  pub fn is_invalid_demand(&self) -> bool { matches!(self, Error::InvalidDemand { .. }) }

  pub fn is_missing_element(&self) -> bool { matches!(self, Error::MissingElement { .. }) }

  pub fn is_upstream(&self) -> bool { matches!(self, Error::Upstream(_)) }
}
