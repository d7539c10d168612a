//! # fountain: backpressure-aware publishers over fixed sequences
//!
//! A [`Fountain`] publishes a finite, pre-materialized sequence under the
//! reactive-streams protocol: `subscribe` hands the subscriber a
//! [`Subscription`] during the handshake, items flow only as far as the
//! subscriber's cumulative `request`s allow, and exactly one terminal signal
//! (completion or error) ends the interaction.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use fountain::prelude::*;
//!
//! struct Collect(Arc<Mutex<Vec<i32>>>);
//!
//! impl Subscriber<i32> for Collect {
//!   fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
//!     subscription.request(UNBOUNDED)
//!   }
//!   fn on_next(&mut self, item: i32) { self.0.lock().unwrap().push(item) }
//!   fn on_error(self, err: Error) { panic!("unexpected {err}") }
//!   fn on_complete(self) {}
//! }
//!
//! let collected = Arc::new(Mutex::new(vec![]));
//! Fountain::from_iter(0..5).subscribe(Collect(collected.clone()));
//! assert_eq!(*collected.lock().unwrap(), vec![0, 1, 2, 3, 4]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Publisher`] | The `subscribe` capability |
//! | [`Fountain`] | Closed set of publishers: sequence, empty, error |
//! | [`Subscriber`] | Consumes handshake, items, error and completion |
//! | [`Subscription`] | `request(n)` / `cancel()` control handle |
//! | [`Source`] | Immutable snapshot drained by a subscription |
//!
//! `request` and `cancel` may be called from any thread, concurrently, and
//! from inside the subscriber's callbacks. Delivery is never concurrent and
//! reentrant demand never deepens the call stack; see
//! [`subscription::sequence`] for how.
//!
//! ## Feature Flags
//!
//! - **`stream`** (default): [`Fountain::into_stream`] bridge to
//!   `futures::Stream`.
//!
//! ## Logging
//!
//! Terminal transitions are reported through [`tracing`] at `debug` (errors)
//! and `trace` (completion, cancellation) level. Install any `tracing`
//! subscriber to see them.
//!
//! [`Publisher`]: publisher::Publisher
//! [`Fountain`]: publisher::Fountain
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`Source`]: source::Source

pub mod error;
pub mod factory;
pub mod prelude;
pub mod publisher;
pub mod source;
#[cfg(feature = "stream")]
pub mod stream;
pub mod subscriber;
pub mod subscription;
mod sync;

pub use prelude::*;
