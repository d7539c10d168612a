//! Recording subscriber shared by the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use fountain::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Signal<T> {
  Subscribe,
  Next(T),
  Error(&'static str),
  Complete,
}

type Hook<T> = Box<dyn FnMut(&SubscriptionHandle, &T) + Send>;

/// Shared view of everything a [`Recorder`] observed.
#[derive(Clone)]
pub struct Log<T> {
  signals: Arc<Mutex<Vec<Signal<T>>>>,
  handle: Arc<Mutex<Option<SubscriptionHandle>>>,
}

impl<T: Clone> Log<T> {
  pub fn signals(&self) -> Vec<Signal<T>> { self.signals.lock().unwrap().clone() }

  pub fn items(&self) -> Vec<T> {
    self
      .signals()
      .into_iter()
      .filter_map(|s| match s {
        Signal::Next(v) => Some(v),
        _ => None,
      })
      .collect()
  }

  pub fn terminals(&self) -> Vec<Signal<T>> {
    self
      .signals()
      .into_iter()
      .filter(|s| matches!(s, Signal::Error(_) | Signal::Complete))
      .collect()
  }

  /// The handle received at handshake.
  pub fn handle(&self) -> SubscriptionHandle {
    self.handle.lock().unwrap().clone().expect("handshake not received")
  }
}

pub struct Recorder<T> {
  log: Log<T>,
  initial: Option<i64>,
  on_next: Option<Hook<T>>,
  handle: Option<SubscriptionHandle>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
  /// A subscriber that requests nothing by itself.
  pub fn new() -> (Self, Log<T>) {
    let log = Log { signals: Arc::default(), handle: Arc::default() };
    (Recorder { log: log.clone(), initial: None, on_next: None, handle: None }, log)
  }

  /// Requests `n` during the handshake.
  pub fn requesting(mut self, n: i64) -> Self {
    self.initial = Some(n);
    self
  }

  /// Runs `hook` after recording each item.
  pub fn with_on_next<F>(mut self, hook: F) -> Self
  where
    F: FnMut(&SubscriptionHandle, &T) + Send + 'static,
  {
    self.on_next = Some(Box::new(hook));
    self
  }

  fn push(&self, signal: Signal<T>) { self.log.signals.lock().unwrap().push(signal) }
}

impl<T: Clone + Send + 'static> Subscriber<T> for Recorder<T> {
  fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
    self.push(Signal::Subscribe);
    *self.log.handle.lock().unwrap() = Some(subscription.clone());
    if let Some(n) = self.initial {
      subscription.request(n);
    }
    self.handle = Some(subscription);
  }

  fn on_next(&mut self, item: T) {
    self.push(Signal::Next(item.clone()));
    if let (Some(hook), Some(handle)) = (self.on_next.as_mut(), self.handle.as_ref()) {
      hook(handle, &item);
    }
  }

  fn on_error(self, err: Error) { self.push(Signal::Error(err.as_label())) }

  fn on_complete(self) { self.push(Signal::Complete) }
}
