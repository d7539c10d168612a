//! Subscriber trait
//!
//! The Subscriber is the consumer side of the protocol. It receives, in this
//! order: one handshake carrying the [`SubscriptionHandle`], zero or more
//! items, and at most one terminal signal (error or completion).

use crate::{error::Error, subscription::SubscriptionHandle};

// ============================================================================
// Subscriber Trait
// ============================================================================

/// Subscriber trait: the consumer of a [`Publisher`](crate::publisher::Publisher)
///
/// Signals are never delivered concurrently: at any instant at most one
/// execution context calls into a given subscriber. They may however arrive
/// on different threads over the life of one subscription, which is why
/// publishers require `Send`.
///
/// It is legal to call [`Subscription::request`] or
/// [`Subscription::cancel`] on the handle from inside any of these
/// callbacks; such calls never recurse back into the subscriber.
///
/// [`Subscription::request`]: crate::subscription::Subscription::request
/// [`Subscription::cancel`]: crate::subscription::Subscription::cancel
pub trait Subscriber<Item> {
  /// Handshake: the first signal, delivered exactly once, before
  /// `subscribe` returns.
  ///
  /// Nothing is delivered until demand is expressed through the handle.
  fn on_subscribe(&mut self, subscription: SubscriptionHandle);

  /// Receive the next item, in source order.
  fn on_next(&mut self, item: Item);

  /// Terminal failure.
  ///
  /// This consumes the subscriber, as no more signals follow an error.
  fn on_error(self, err: Error);

  /// Terminal success: every item of the source was delivered.
  ///
  /// This consumes the subscriber, as no more signals follow completion.
  fn on_complete(self);
}

// ============================================================================
// Boxed Subscribers
// ============================================================================

/// Object-safe mirror of [`Subscriber`].
///
/// `Subscriber` consumes `self` on terminal signals, which is not callable on
/// a trait object. `DynSubscriber` adapts those methods to `Box<Self>`.
pub trait DynSubscriber<Item> {
  fn box_on_subscribe(&mut self, subscription: SubscriptionHandle);
  fn box_on_next(&mut self, item: Item);
  fn box_on_error(self: Box<Self>, err: Error);
  fn box_on_complete(self: Box<Self>);
}

impl<T, Item> DynSubscriber<Item> for T
where
  T: Subscriber<Item>,
{
  fn box_on_subscribe(&mut self, subscription: SubscriptionHandle) {
    self.on_subscribe(subscription)
  }
  fn box_on_next(&mut self, item: Item) { self.on_next(item) }
  fn box_on_error(self: Box<Self>, err: Error) { (*self).on_error(err) }
  fn box_on_complete(self: Box<Self>) { (*self).on_complete() }
}

/// A type-erased, thread-safe subscriber.
pub type BoxedSubscriber<Item> = Box<dyn DynSubscriber<Item> + Send>;

impl<Item> Subscriber<Item> for BoxedSubscriber<Item> {
  #[inline]
  fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
    (**self).box_on_subscribe(subscription)
  }

  #[inline]
  fn on_next(&mut self, item: Item) { (**self).box_on_next(item) }

  #[inline]
  fn on_error(self, err: Error) { self.box_on_error(err) }

  #[inline]
  fn on_complete(self) { self.box_on_complete() }
}
