//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

#[cfg(feature = "stream")]
pub use crate::stream::FountainStream;
pub use crate::{
  error::{Error, Result},
  publisher::{Fountain, Publisher},
  source::Source,
  subscriber::{BoxedSubscriber, DynSubscriber, Subscriber},
  subscription::{
    EmptySubscription, SequenceSubscription, Subscription, SubscriptionHandle, EMPTY_SUBSCRIPTION,
    UNBOUNDED,
  },
};
