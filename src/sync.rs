//! Atomic primitives used by the demand-tracking subscription.
//!
//! Under `--cfg loom` the loom model-checker types are substituted so that
//! `tests/loom.rs` explores every interleaving of the drain loop. `Arc` and
//! `Mutex` stay the std versions: the handle needs unsized coercion to
//! `dyn Subscription`, and the subscriber cell is only ever touched by the
//! drain owner.

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{AtomicI64, AtomicU8, AtomicUsize, Ordering};
#[cfg(not(loom))]
pub(crate) use std::sync::atomic::{AtomicI64, AtomicU8, AtomicUsize, Ordering};
