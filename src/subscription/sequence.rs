//! Demand-tracking subscription over a [`Source`].
//!
//! # Drain ownership
//!
//! Every signal to the subscriber is delivered by the single context that
//! currently owns the drain. Ownership is a work counter (`wip`): every
//! `request`, `cancel` or rejection records its effect first and then
//! increments the counter, and only the caller that moved it away from zero
//! drains. Everyone else returns at once. This covers both racing threads and
//! a subscriber calling `request` from inside `on_next`, which therefore
//! never grows the call stack.
//!
//! The owner releases by subtracting the increments it has already served.
//! A non-zero result means more signals arrived meanwhile and it loops
//! again. Both sides only touch the counter through read-modify-write
//! operations, so no signal falls between a release and a late increment.
//!
//! # Demand
//!
//! Demand is tracked as a cumulative index (`requested`) clamped to the source
//! length rather than as an outstanding count. Outstanding demand is
//! `requested - cursor`, so it can never exceed the remaining items and never
//! needs to be decremented by the owner.
//!
//! After a terminal signal the owner never releases the counter, so nothing
//! can be delivered again.

use std::{
  fmt::{Debug, Formatter},
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{debug, trace};

use super::{Subscription, SubscriptionHandle};
use crate::{
  error::Error,
  source::Source,
  subscriber::Subscriber,
  sync::{AtomicI64, AtomicU8, AtomicUsize, Ordering},
};

const ACTIVE: u8 = 0;
/// Invalid demand was recorded; the owner still has to deliver the error.
const REJECTED: u8 = 1;
const CANCELLED: u8 = 2;
const COMPLETED: u8 = 3;
const FAILED: u8 = 4;

/// Sentinel for `rejected`. Positive, so never a rejected amount.
const NO_REJECTION: i64 = i64::MAX;

/// Binds one [`Source`] to one [`Subscriber`] and drains it on demand.
///
/// Created by [`SequenceSubscription::subscribe`], which performs the
/// handshake; afterwards it is only reachable through the
/// [`SubscriptionHandle`] given to the subscriber.
pub struct SequenceSubscription<T, S> {
  source: Source<T>,
  /// Only locked by the drain owner, so the lock is never contended and a
  /// reentrant `request` never touches it.
  subscriber: Mutex<Option<S>>,
  /// Cumulative demand, never above `source.len()`.
  requested: AtomicUsize,
  /// Next position to examine. Written by the drain owner only.
  cursor: AtomicUsize,
  /// Signals recorded but not yet served by the drain owner; non-zero while
  /// a drain is running.
  wip: AtomicUsize,
  state: AtomicU8,
  rejected: AtomicI64,
}

impl<T, S> SequenceSubscription<T, S>
where
  T: Clone + Send + Sync + 'static,
  S: Subscriber<T> + Send + 'static,
{
  /// Creates the subscription and delivers the handshake to `subscriber`.
  ///
  /// The handshake runs while this call owns the drain, so demand requested
  /// from inside `on_subscribe` is served right after it returns, still
  /// before `subscribe` returns.
  pub fn subscribe(source: Source<T>, subscriber: S) {
    let subscription = Arc::new(SequenceSubscription {
      source,
      subscriber: Mutex::new(Some(subscriber)),
      requested: AtomicUsize::new(0),
      cursor: AtomicUsize::new(0),
      wip: AtomicUsize::new(1),
      state: AtomicU8::new(ACTIVE),
      rejected: AtomicI64::new(NO_REJECTION),
    });
    let handle = SubscriptionHandle::new(subscription.clone());
    if let Some(subscriber) = subscription.lock().as_mut() {
      subscriber.on_subscribe(handle);
    }
    subscription.drain();
  }
}

impl<T, S> SequenceSubscription<T, S>
where
  T: Clone,
  S: Subscriber<T>,
{
  /// Runs while owning `wip`. Returns with `wip` released, or held forever
  /// once a terminal state is reached.
  fn drain(&self) {
    let len = self.source.len();
    let mut cursor = self.cursor.load(Ordering::Relaxed);
    let mut missed = 1;
    loop {
      let mut limit = self.requested.load(Ordering::SeqCst);
      while cursor < limit {
        if self.state.load(Ordering::SeqCst) != ACTIVE {
          return self.settle();
        }
        let Some(item) = &self.source[cursor] else {
          return self.fail(cursor);
        };
        if let Some(subscriber) = self.lock().as_mut() {
          subscriber.on_next(item.clone());
        }
        cursor += 1;
        self.cursor.store(cursor, Ordering::Relaxed);
        if cursor == limit {
          limit = self.requested.load(Ordering::SeqCst);
        }
      }

      if cursor == len {
        return self.complete();
      }
      if self.state.load(Ordering::SeqCst) != ACTIVE {
        return self.settle();
      }

      missed = self.wip.fetch_sub(missed, Ordering::AcqRel) - missed;
      if missed == 0 {
        return;
      }
    }
  }

  /// Records one more signal for the drain; true if the caller now owns it.
  fn enter(&self) -> bool { self.wip.fetch_add(1, Ordering::AcqRel) == 0 }

  fn complete(&self) {
    if self.transition(COMPLETED).is_err() {
      return self.settle();
    }
    let len = self.source.len();
    trace!(delivered = len, len, "sequence subscription completed");
    if let Some(subscriber) = self.take_subscriber() {
      subscriber.on_complete();
    }
  }

  fn fail(&self, index: usize) {
    if self.transition(FAILED).is_err() {
      return self.settle();
    }
    let err = Error::MissingElement { index };
    debug!(
      label = err.as_label(),
      index,
      len = self.source.len(),
      "terminating on missing element"
    );
    if let Some(subscriber) = self.take_subscriber() {
      subscriber.on_error(err);
    }
  }

  /// Owner-side handling of a cancellation or a pending invalid-demand error.
  fn settle(&self) {
    let subscriber = self.take_subscriber();
    let rejected =
      self.state.compare_exchange(REJECTED, CANCELLED, Ordering::SeqCst, Ordering::SeqCst).is_ok();
    if rejected {
      let requested = self.rejected.load(Ordering::SeqCst);
      let err = Error::InvalidDemand { requested };
      debug!(label = err.as_label(), requested, len = self.source.len(), "rejecting demand");
      if let Some(subscriber) = subscriber {
        subscriber.on_error(err);
      }
    } else {
      let delivered = self.cursor.load(Ordering::Relaxed);
      trace!(delivered, len = self.source.len(), "sequence subscription cancelled");
    }
  }

  fn reject(&self, n: i64) {
    if self.rejected.compare_exchange(NO_REJECTION, n, Ordering::SeqCst, Ordering::SeqCst).is_err()
    {
      return;
    }
    if self.transition(REJECTED).is_ok() && self.enter() {
      self.settle();
    }
  }

  fn transition(&self, to: u8) -> Result<u8, u8> {
    self.state.compare_exchange(ACTIVE, to, Ordering::SeqCst, Ordering::SeqCst)
  }

  fn take_subscriber(&self) -> Option<S> { self.lock().take() }

  fn lock(&self) -> MutexGuard<'_, Option<S>> {
    self.subscriber.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl<T, S> Subscription for SequenceSubscription<T, S>
where
  T: Clone,
  S: Subscriber<T>,
{
  fn request(&self, n: i64) {
    if self.state.load(Ordering::SeqCst) != ACTIVE {
      return;
    }
    if n < 1 {
      return self.reject(n);
    }

    let len = self.source.len();
    let n = usize::try_from(n).unwrap_or(usize::MAX);
    let mut current = self.requested.load(Ordering::SeqCst);
    loop {
      let next = current.saturating_add(n).min(len);
      if next == current {
        break;
      }
      match self.requested.compare_exchange_weak(current, next, Ordering::SeqCst, Ordering::SeqCst)
      {
        Ok(_) => break,
        Err(actual) => current = actual,
      }
    }

    if self.enter() {
      self.drain();
    }
  }

  fn cancel(&self) {
    if self.transition(CANCELLED).is_ok() && self.enter() {
      self.settle();
    }
  }

  fn is_closed(&self) -> bool { self.state.load(Ordering::SeqCst) != ACTIVE }
}

impl<T, S> Debug for SequenceSubscription<T, S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = match self.state.load(Ordering::SeqCst) {
      ACTIVE => "active",
      REJECTED | CANCELLED => "cancelled",
      COMPLETED => "completed",
      _ => "failed",
    };
    f.debug_struct("SequenceSubscription")
      .field("len", &self.source.len())
      .field("requested", &self.requested.load(Ordering::SeqCst))
      .field("state", &state)
      .finish()
  }
}
