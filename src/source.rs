//! The immutable, finite sequence a publisher drains.

use std::{
  fmt::{Debug, Formatter},
  ops::Index,
  sync::Arc,
};

/// Ordered, fixed-length snapshot of the items to publish.
///
/// Each slot is either an item or `None`, the "missing element" marker. The
/// snapshot is built by copying the caller's data and is never mutated
/// afterwards, so every subscription of the same publisher reads it without
/// synchronisation. Cloning shares the snapshot.
pub struct Source<T>(Arc<[Option<T>]>);

impl<T> Source<T> {
  /// Builds a snapshot from slots, `None` marking a missing element.
  pub fn from_slots<I>(slots: I) -> Self
  where
    I: IntoIterator<Item = Option<T>>,
  {
    Source(slots.into_iter().collect())
  }

  #[inline]
  pub fn len(&self) -> usize { self.0.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Index of the first missing slot, if any.
  pub fn first_missing(&self) -> Option<usize> { self.0.iter().position(Option::is_none) }

  #[inline]
  pub fn get(&self, index: usize) -> Option<&Option<T>> { self.0.get(index) }
}

impl<T: Clone> Source<T> {
  /// Copies `items` into a new snapshot; later changes to `items` are not
  /// observed.
  pub fn from_slice(items: &[T]) -> Self { Source(items.iter().cloned().map(Some).collect()) }
}

impl<T> FromIterator<T> for Source<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Source::from_slots(iter.into_iter().map(Some))
  }
}

impl<T> Index<usize> for Source<T> {
  type Output = Option<T>;

  #[inline]
  fn index(&self, index: usize) -> &Self::Output { &self.0[index] }
}

impl<T> Clone for Source<T> {
  #[inline]
  fn clone(&self) -> Self { Source(self.0.clone()) }
}

impl<T> Debug for Source<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Source")
      .field("len", &self.len())
      .field("first_missing", &self.first_missing())
      .finish()
  }
}

#[cfg(all(test, not(loom)))]
mod tests {
  use super::*;

  #[test]
  fn snapshot_is_a_defensive_copy() {
    let mut items = vec![1, 2, 3];
    let source = Source::from_slice(&items);
    items[0] = 100;
    items.push(4);

    assert_eq!(source.len(), 3);
    assert_eq!(source[0], Some(1));
  }

  #[test]
  fn clones_share_storage() {
    let source: Source<_> = (0..4).collect();
    let copy = source.clone();
    assert!(Arc::ptr_eq(&source.0, &copy.0));
  }

  #[test]
  fn reports_first_missing_slot() {
    let source = Source::from_slots([Some('a'), None, Some('c'), None]);
    assert_eq!(source.first_missing(), Some(1));
    assert_eq!(source.get(2), Some(&Some('c')));
    assert_eq!(source.get(4), None);

    let full: Source<char> = "abc".chars().collect();
    assert_eq!(full.first_missing(), None);
  }
}
