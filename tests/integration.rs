//! End-to-end protocol behavior of `Fountain` publishers.
#![cfg(not(loom))]

mod common;

use std::{
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
  thread,
};

use common::{Recorder, Signal};
use fountain::prelude::*;

fn generate(n: i64) -> Vec<i64> { (0..n).collect() }

#[test]
fn signals_are_emitted_in_order() {
  let items = generate(5);
  let (recorder, log) = Recorder::new();
  Fountain::from_iter(items.clone()).subscribe(recorder.requesting(5));

  let mut expected = vec![Signal::Subscribe];
  expected.extend(items.into_iter().map(Signal::Next));
  expected.push(Signal::Complete);
  assert_eq!(log.signals(), expected);
}

#[test]
fn one_at_a_time_yields_every_item_then_completes() {
  let (recorder, log) = Recorder::new();
  Fountain::from_slice(&generate(7)).subscribe(recorder);
  let handle = log.handle();

  for delivered in 1..=7 {
    assert!(log.terminals().is_empty());
    handle.request(1);
    assert_eq!(log.items(), generate(delivered));
  }
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn backpressure_is_respected() {
  let (recorder, log) = Recorder::new();
  Fountain::from_slice(&generate(5)).subscribe(recorder);
  let handle = log.handle();
  assert_eq!(log.signals(), vec![Signal::Subscribe]);

  handle.request(1);
  assert_eq!(log.items(), vec![0]);
  handle.request(1);
  assert_eq!(log.items(), vec![0, 1]);
  handle.request(2);
  assert_eq!(log.items(), vec![0, 1, 2, 3]);
  handle.request(20);
  assert_eq!(log.items(), generate(5));
  handle.request(20);
  assert_eq!(log.items(), generate(5));
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn over_requesting_completes_without_error() {
  let (recorder, log) = Recorder::new();
  Fountain::from_slice(&generate(10)).subscribe(recorder.requesting(10 + 100));
  assert_eq!(log.items(), generate(10));
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn missing_element_yields_prefix_then_one_error() {
  let (recorder, log) = Recorder::new();
  Fountain::from_slots([Some(0), Some(1), None, Some(3), Some(4)])
    .subscribe(recorder.requesting(UNBOUNDED));

  assert_eq!(log.items(), vec![0, 1]);
  assert_eq!(log.terminals(), vec![Signal::Error("missing_element")]);
  log.handle().request(10);
  assert_eq!(log.items(), vec![0, 1]);
  assert_eq!(log.terminals().len(), 1);
}

#[test]
fn sole_missing_element_errors() {
  let (recorder, log) = Recorder::<i64>::new();
  Fountain::from_slots([None]).subscribe(recorder.requesting(4));
  assert_eq!(log.signals(), vec![Signal::Subscribe, Signal::Error("missing_element")]);
}

#[test]
fn non_positive_demand_is_an_error_and_cancels() {
  for bad in [0, -1] {
    let (recorder, log) = Recorder::new();
    Fountain::from_slice(&generate(10)).subscribe(recorder);
    let handle = log.handle();

    handle.request(bad);
    assert_eq!(log.terminals(), vec![Signal::Error("invalid_demand")]);
    assert!(handle.is_closed());

    handle.request(5);
    assert!(log.items().is_empty());
    assert_eq!(log.terminals().len(), 1);
  }
}

#[test]
fn cancel_before_request_delivers_nothing() {
  let (recorder, log) = Recorder::new();
  Fountain::from_slice(&generate(1_000)).subscribe(recorder);
  let handle = log.handle();
  handle.cancel();
  handle.request(1_000);
  handle.request(-1);
  assert_eq!(log.signals(), vec![Signal::Subscribe]);
}

#[test]
fn cancel_during_handshake_delivers_nothing() {
  let (recorder, log) = Recorder::new();
  let recorder = recorder.with_on_next(|_, _| unreachable!("no item may follow cancellation"));
  struct CancelFirst(Recorder<i64>);
  impl Subscriber<i64> for CancelFirst {
    fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
      subscription.cancel();
      subscription.request(1_000);
      self.0.on_subscribe(subscription);
    }
    fn on_next(&mut self, item: i64) { self.0.on_next(item) }
    fn on_error(self, err: Error) { self.0.on_error(err) }
    fn on_complete(self) { self.0.on_complete() }
  }

  Fountain::from_slice(&generate(1_000)).subscribe(CancelFirst(recorder));
  assert_eq!(log.signals(), vec![Signal::Subscribe]);
}

#[test]
fn wrapped_subscriber_receives_every_signal() {
  struct Forward(Recorder<i64>);
  impl Subscriber<i64> for Forward {
    fn on_subscribe(&mut self, subscription: SubscriptionHandle) {
      self.0.on_subscribe(subscription)
    }
    fn on_next(&mut self, item: i64) { self.0.on_next(item) }
    fn on_error(self, err: Error) { self.0.on_error(err) }
    fn on_complete(self) { self.0.on_complete() }
  }

  let (recorder, log) = Recorder::new();
  let recorder = recorder.requesting(1).with_on_next(|handle, _| handle.request(1));
  Fountain::from_iter(generate(4)).subscribe(Forward(recorder));

  let mut expected = vec![Signal::Subscribe];
  expected.extend(generate(4).into_iter().map(Signal::Next));
  expected.push(Signal::Complete);
  assert_eq!(log.signals(), expected);
}

#[test]
fn concurrent_single_requests_deliver_everything_once() {
  const N: i64 = 10_000;
  let (recorder, log) = Recorder::new();
  Fountain::from_iter(generate(N)).subscribe(recorder);
  let handle = log.handle();

  let threads: Vec<_> = (0..16)
    .map(|_| {
      let handle = handle.clone();
      thread::spawn(move || {
        for _ in 0..N / 16 {
          handle.request(1);
        }
      })
    })
    .collect();
  for t in threads {
    t.join().unwrap();
  }

  assert_eq!(log.items(), generate(N));
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn requests_from_inside_on_next_do_not_grow_the_stack() {
  const N: i64 = 50_000;
  let (recorder, log) = Recorder::new();
  let recorder = recorder.requesting(1).with_on_next(|handle, _| handle.request(1));

  // A small stack turns any recursion into a crash.
  thread::Builder::new()
    .stack_size(256 * 1024)
    .spawn(move || Fountain::from_iter(generate(N)).subscribe(recorder))
    .unwrap()
    .join()
    .unwrap();

  assert_eq!(log.items(), generate(N));
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn subscriber_requesting_from_other_threads_inside_on_next() {
  const N: i64 = 2_000;
  let (recorder, log) = Recorder::new();
  let recorder = recorder.requesting(1).with_on_next(|handle, _| {
    let handle = handle.clone();
    thread::spawn(move || handle.request(1));
  });
  Fountain::from_iter(generate(N)).subscribe(recorder);

  // Every item spawns the request for the next one; wait for the chain.
  while log.terminals().is_empty() {
    thread::yield_now();
  }
  assert_eq!(log.items(), generate(N));
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}

#[test]
fn empty_sources_complete_after_handshake() {
  let sources: Vec<Fountain<i64>> = vec![
    Fountain::empty(),
    Fountain::from_slice(&[]),
    Fountain::from_iter(vec![]),
    Fountain::from_optional(None::<Vec<i64>>),
    fountain::just![],
  ];
  for source in sources {
    let (recorder, log) = Recorder::new();
    source.subscribe(recorder);
    assert_eq!(log.signals(), vec![Signal::Subscribe, Signal::Complete]);
    assert!(log.handle().is_closed());
  }
}

#[test]
fn failed_publisher_errors_after_handshake() {
  let publisher = Fountain::<i64>::error(std::io::Error::other("unavailable"));
  let (recorder, log) = Recorder::new();
  publisher.subscribe(recorder.requesting(10));
  assert_eq!(log.signals(), vec![Signal::Subscribe, Signal::Error("upstream")]);
}

#[test]
fn just_macro_publishes_literals() {
  let (recorder, log) = Recorder::new();
  fountain::just!["a", "b", "c"].subscribe(recorder.requesting(UNBOUNDED));
  assert_eq!(log.items(), vec!["a", "b", "c"]);
}

#[test]
fn one_publisher_many_subscribers() {
  let publisher = Fountain::from_iter(generate(3));
  let completions = Arc::new(AtomicUsize::new(0));
  let mut logs = vec![];
  for n in 1..=3 {
    let (recorder, log) = Recorder::new();
    let completions = completions.clone();
    publisher.subscribe(recorder.requesting(n).with_on_next(move |handle, item| {
      if *item == 2 {
        completions.fetch_add(1, Ordering::SeqCst);
      }
      handle.request(1);
    }));
    logs.push(log);
  }
  for log in logs {
    assert_eq!(log.items(), generate(3));
  }
  assert_eq!(completions.load(Ordering::SeqCst), 3);
}

#[test]
fn boxed_subscribers_are_accepted() {
  let (recorder, log) = Recorder::new();
  let boxed: BoxedSubscriber<i64> = Box::new(recorder.requesting(2));
  Fountain::from_iter(generate(2)).subscribe(boxed);
  assert_eq!(log.terminals(), vec![Signal::Complete]);
}
