use super::Subscription;

/// The subscription handed out by publishers that terminate during the
/// handshake (empty sources and failed publishers).
///
/// It carries no state, so a single process-wide value serves every
/// subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySubscription;

/// The shared inert subscription.
pub static EMPTY_SUBSCRIPTION: EmptySubscription = EmptySubscription;

impl Subscription for EmptySubscription {
  #[inline]
  fn request(&self, _n: i64) {}

  #[inline]
  fn cancel(&self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}
