//! IntoStream bridge
//!
//! Converts a [`Fountain`] into a [`futures::Stream`] so it can be consumed
//! with `while let` loops in async code.
//!
//! Unlike a plain buffering adapter, the stream keeps backpressure intact:
//! demand is only requested from the subscription when the consumer polls an
//! empty buffer, `prefetch` items at a time.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use fountain::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let mut stream = Fountain::from_iter([1, 2, 3]).into_stream();
//!
//! let mut values = vec![];
//! while let Some(Ok(value)) = stream.next().await {
//!   values.push(value);
//! }
//! assert_eq!(values, vec![1, 2, 3]);
//! # });
//! ```

use std::{
  collections::VecDeque,
  pin::Pin,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
  task::{Context, Poll, Waker},
};

use futures::stream::{FusedStream, Stream};

use crate::{
  error::Error,
  publisher::{Fountain, Publisher},
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionHandle, UNBOUNDED},
};

/// State shared between the subscriber side and the polling side.
struct StreamState<T> {
  /// Items and the terminal error waiting to be polled.
  queue: VecDeque<Result<T, Error>>,
  waker: Option<Waker>,
  subscription: Option<SubscriptionHandle>,
  /// Requested but not yet delivered.
  outstanding: usize,
  is_closed: bool,
}

impl<T> Default for StreamState<T> {
  fn default() -> Self {
    StreamState {
      queue: VecDeque::new(),
      waker: None,
      subscription: None,
      outstanding: 0,
      is_closed: false,
    }
  }
}

type SharedState<T> = Arc<Mutex<StreamState<T>>>;

fn lock<T>(state: &SharedState<T>) -> MutexGuard<'_, StreamState<T>> {
  state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A `Stream` that yields the signals of a [`Fountain`] subscription.
///
/// Created by [`Fountain::into_stream`]. Yields:
/// - `Ok(T)` for each delivered item;
/// - `Err(Error)` once if the subscription fails, then `None`;
/// - `None` after completion.
///
/// Dropping the stream cancels the subscription.
pub struct FountainStream<T> {
  state: SharedState<T>,
  prefetch: usize,
}

impl<T> Fountain<T>
where
  T: Clone + Send + Sync + 'static,
{
  /// Subscribes and exposes the signals as a stream, requesting one item per
  /// poll of an empty buffer.
  pub fn into_stream(self) -> FountainStream<T> { self.into_stream_with_prefetch(1) }

  /// Like [`into_stream`](Fountain::into_stream) but requests `prefetch`
  /// items at a time. `0` is treated as `1`.
  pub fn into_stream_with_prefetch(self, prefetch: usize) -> FountainStream<T> {
    let state = SharedState::default();
    self.subscribe(StreamSubscriber { state: state.clone() });
    FountainStream { state, prefetch: prefetch.max(1) }
  }
}

impl<T> Stream for FountainStream<T> {
  type Item = Result<T, Error>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.get_mut();
    loop {
      let mut state = lock(&this.state);
      if let Some(item) = state.queue.pop_front() {
        return Poll::Ready(Some(item));
      }
      if state.is_closed {
        return Poll::Ready(None);
      }

      let subscription = match state.subscription.clone() {
        Some(subscription) if state.outstanding == 0 => subscription,
        _ => {
          state.waker = Some(cx.waker().clone());
          return Poll::Pending;
        }
      };
      state.outstanding = this.prefetch;
      // Delivery is synchronous and locks the state from `on_next`.
      drop(state);
      subscription.request(i64::try_from(this.prefetch).unwrap_or(UNBOUNDED));
    }
  }
}

impl<T> FusedStream for FountainStream<T> {
  fn is_terminated(&self) -> bool {
    let state = lock(&self.state);
    state.is_closed && state.queue.is_empty()
  }
}

impl<T> Drop for FountainStream<T> {
  fn drop(&mut self) {
    let subscription = lock(&self.state).subscription.take();
    if let Some(subscription) = subscription {
      subscription.cancel();
    }
  }
}

/// A `Subscriber` that forwards signals into a [`StreamState`].
struct StreamSubscriber<T> {
  state: SharedState<T>,
}

impl<T> StreamSubscriber<T> {
  fn close(&self, last: Option<Error>) {
    let mut state = lock(&self.state);
    state.queue.extend(last.map(Err));
    state.is_closed = true;
    state.subscription = None;
    if let Some(waker) = state.waker.take() {
      waker.wake();
    }
  }
}

impl<T> Subscriber<T> for StreamSubscriber<T> {
  fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
    lock(&self.state).subscription = Some(subscription);
  }

  fn on_next(&mut self, item: T) {
    let mut state = lock(&self.state);
    state.queue.push_back(Ok(item));
    state.outstanding = state.outstanding.saturating_sub(1);
    if let Some(waker) = state.waker.take() {
      waker.wake();
    }
  }

  fn on_error(self, err: Error) { self.close(Some(err)) }

  fn on_complete(self) { self.close(None) }
}
