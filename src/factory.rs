//! Constructors for [`Fountain`]
//!
//! Every constructor copies its input into an immutable [`Source`] snapshot,
//! so later changes to the caller's collection are never observed by
//! subscribers. A zero-length input always selects the [`Fountain::Empty`]
//! variant.
//!
//! | Constructor | Input | Variant |
//! |-------------|-------|---------|
//! | [`Fountain::from_slice`] | `&[T]` | `Sequence` or `Empty` |
//! | [`Fountain::from_iter`] | any `IntoIterator<Item = T>` | `Sequence` or `Empty` |
//! | [`Fountain::just`] / [`just!`](crate::just) | literal list | `Sequence` or `Empty` |
//! | [`Fountain::from_slots`] | `IntoIterator<Item = Option<T>>` | `Sequence` or `Empty` |
//! | [`Fountain::from_optional`] | `Option<IntoIterator>` | `Empty` for `None` |
//! | [`Fountain::empty`] | - | `Empty` |
//! | [`Fountain::error`] | a failure | `Error` |
//!
//! ```rust
//! use fountain::prelude::*;
//!
//! let numbers = Fountain::from_iter(1..=3);
//! let words = fountain::just!["a", "b"];
//! let nothing = Fountain::<u8>::empty();
//!
//! assert_eq!(numbers.len(), 3);
//! assert_eq!(words.len(), 2);
//! assert!(nothing.is_empty());
//! ```

use std::error::Error as StdError;

use crate::{error::Error, publisher::Fountain, source::Source};

impl<T> Fountain<T> {
  /// Publishes a copy of `items`, in order.
  pub fn from_slice(items: &[T]) -> Self
  where
    T: Clone,
  {
    Self::from_source(Source::from_slice(items))
  }

  /// Publishes every item yielded by `items`, in order.
  ///
  /// The iterator is consumed eagerly; it must be finite.
  #[allow(clippy::should_implement_trait)]
  pub fn from_iter<I>(items: I) -> Self
  where
    I: IntoIterator<Item = T>,
  {
    Self::from_source(items.into_iter().collect())
  }

  /// Publishes a fixed list of items. See also [`just!`](crate::just).
  pub fn just<const N: usize>(items: [T; N]) -> Self { Self::from_iter(items) }

  /// Publishes slots that may be missing.
  ///
  /// Subscribers receive the items up to the first `None` and then a single
  /// [`Error::MissingElement`], provided their demand reaches that far.
  ///
  /// ```rust
  /// use fountain::prelude::*;
  ///
  /// let fountain = Fountain::from_slots([Some(1), None, Some(3)]);
  /// assert_eq!(fountain.len(), 3);
  /// ```
  pub fn from_slots<I>(slots: I) -> Self
  where
    I: IntoIterator<Item = Option<T>>,
  {
    Self::from_source(Source::from_slots(slots))
  }

  /// Publishes `items` when present; `None` selects the empty publisher.
  pub fn from_optional<I>(items: Option<I>) -> Self
  where
    I: IntoIterator<Item = T>,
  {
    items.map_or(Fountain::Empty, Self::from_iter)
  }

  /// A publisher that completes immediately after the handshake.
  pub const fn empty() -> Self { Fountain::Empty }

  /// A publisher that fails immediately after the handshake with `cause`.
  ///
  /// Every subscriber receives a clone of the same [`Error::Upstream`].
  pub fn error<E>(cause: E) -> Self
  where
    E: StdError + Send + Sync + 'static,
  {
    Fountain::Error(Error::upstream(cause))
  }

  /// A publisher that fails immediately after the handshake with `err`.
  pub fn failed(err: Error) -> Self { Fountain::Error(err) }

  fn from_source(source: Source<T>) -> Self {
    if source.is_empty() {
      Fountain::Empty
    } else {
      Fountain::Sequence(source)
    }
  }
}

impl<T> FromIterator<T> for Fountain<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self { Fountain::from_iter(iter) }
}

impl<T: Clone> From<&[T]> for Fountain<T> {
  fn from(items: &[T]) -> Self { Fountain::from_slice(items) }
}

impl<T> From<Vec<T>> for Fountain<T> {
  fn from(items: Vec<T>) -> Self { Fountain::from_iter(items) }
}

/// Creates a [`Fountain`] publishing the given items, in order.
///
/// `just![]` needs a type annotation and yields the empty publisher.
///
/// ```rust
/// use fountain::prelude::*;
///
/// let fountain = fountain::just![1, 2, 3];
/// assert_eq!(fountain.len(), 3);
///
/// let nothing: Fountain<i32> = fountain::just![];
/// assert!(matches!(nothing, Fountain::Empty));
/// ```
#[macro_export]
macro_rules! just {
  ( $( $item:expr ),* $(,)? ) => {
    $crate::publisher::Fountain::just([ $( $item ),* ])
  };
}
