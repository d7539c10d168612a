//! Publisher capability and the closed set of publisher variants.

use crate::{
  error::Error,
  source::Source,
  subscriber::Subscriber,
  subscription::{SequenceSubscription, SubscriptionHandle},
};

/// A provider of items that delivers them to subscribers on demand.
///
/// `subscribe` performs the handshake synchronously: by the time it returns
/// the subscriber has received `on_subscribe`, plus whatever its demand from
/// inside `on_subscribe` (or an immediate terminal signal) produced.
pub trait Publisher<Item> {
  fn subscribe<S>(&self, subscriber: S)
  where
    S: Subscriber<Item> + Send + 'static;
}

/// A publisher over a finite, pre-materialized sequence.
///
/// The variant is chosen at construction by the constructors in
/// [`factory`](crate::factory); every variant can be subscribed any number of
/// times, each subscription getting its own demand and cursor.
#[derive(Debug, Clone)]
pub enum Fountain<T> {
  /// Drains a non-empty [`Source`] on demand.
  Sequence(Source<T>),
  /// Completes right after the handshake.
  Empty,
  /// Fails with the carried error right after the handshake.
  Error(Error),
}

impl<T> Fountain<T> {
  /// Number of items a subscriber can receive at most.
  pub fn len(&self) -> usize {
    match self {
      Fountain::Sequence(source) => source.len(),
      Fountain::Empty | Fountain::Error(_) => 0,
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<T> Publisher<T> for Fountain<T>
where
  T: Clone + Send + Sync + 'static,
{
  fn subscribe<S>(&self, mut subscriber: S)
  where
    S: Subscriber<T> + Send + 'static,
  {
    match self {
      Fountain::Sequence(source) => SequenceSubscription::subscribe(source.clone(), subscriber),
      Fountain::Empty => {
        subscriber.on_subscribe(SubscriptionHandle::empty());
        subscriber.on_complete();
      }
      Fountain::Error(err) => {
        subscriber.on_subscribe(SubscriptionHandle::empty());
        subscriber.on_error(err.clone());
      }
    }
  }
}
