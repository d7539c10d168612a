//! Subscription trait and the handle handed out at handshake.
//!
//! A [`Subscription`] is the subscriber's control surface over one
//! publisher/subscriber pairing: it asks for more items with
//! [`request`](Subscription::request) and stops the flow with
//! [`cancel`](Subscription::cancel). Neither call ever fails or blocks; any
//! fault is reported to the subscriber as an error signal.

use std::{
  fmt::{Debug, Formatter},
  sync::Arc,
};

mod empty;
pub mod sequence;

pub use empty::{EmptySubscription, EMPTY_SUBSCRIPTION};
pub use sequence::SequenceSubscription;

/// Demand that asks for every remaining item.
pub const UNBOUNDED: i64 = i64::MAX;

/// Control handle over a running subscription.
///
/// Implementations must tolerate calls from any thread, concurrently, and
/// reentrantly from inside the subscriber's own callbacks.
pub trait Subscription {
  /// Adds `n` to the outstanding demand.
  ///
  /// `n < 1` is a protocol violation: the subscription is cancelled and the
  /// subscriber receives [`Error::InvalidDemand`](crate::Error::InvalidDemand).
  /// After a terminal signal or cancellation this is a no-op.
  fn request(&self, n: i64);

  /// Stops delivery. Idempotent.
  fn cancel(&self);

  /// Checks if the subscription reached a terminal state (completed, failed
  /// or cancelled).
  fn is_closed(&self) -> bool;
}

// ==================== SubscriptionHandle ====================

/// The value delivered to [`Subscriber::on_subscribe`].
///
/// Cloning is cheap and every clone drives the same subscription, so a
/// subscriber may hand copies to other threads that request on its behalf.
///
/// [`Subscriber::on_subscribe`]: crate::subscriber::Subscriber::on_subscribe
#[derive(Clone)]
pub struct SubscriptionHandle(HandleInner);

#[derive(Clone)]
enum HandleInner {
  Active(Arc<dyn Subscription + Send + Sync>),
  Inert(&'static EmptySubscription),
}

impl SubscriptionHandle {
  pub(crate) fn new(subscription: Arc<dyn Subscription + Send + Sync>) -> Self {
    SubscriptionHandle(HandleInner::Active(subscription))
  }

  /// Handle over the shared inert subscription used by the empty and error
  /// publishers. Does not allocate.
  pub fn empty() -> Self { SubscriptionHandle(HandleInner::Inert(&EMPTY_SUBSCRIPTION)) }

  fn get(&self) -> &dyn Subscription {
    match &self.0 {
      HandleInner::Active(s) => &**s,
      HandleInner::Inert(s) => *s,
    }
  }
}

impl Subscription for SubscriptionHandle {
  #[inline]
  fn request(&self, n: i64) { self.get().request(n) }

  #[inline]
  fn cancel(&self) { self.get().cancel() }

  #[inline]
  fn is_closed(&self) -> bool { self.get().is_closed() }
}

impl Debug for SubscriptionHandle {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SubscriptionHandle")
      .field("inert", &matches!(self.0, HandleInner::Inert(_)))
      .field("is_closed", &self.is_closed())
      .finish()
  }
}
