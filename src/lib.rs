//! A lock-based realization of RCU (Read-Copy-Update) grace periods.
//!
//! RCU lets many readers traverse a shared structure while a writer swaps in
//! a new version of it. The writer's problem is reclamation: the old version
//! may only be freed once no reader can still be looking at it. The interval
//! the writer has to wait out is called a _grace period_, and the whole
//! cleverness of any RCU scheme lives in how cheaply it can detect that the
//! grace period is over. The [kernel docs](https://www.kernel.org/doc/html/latest/RCU/whatisRCU.html)
//! are the canonical tour of the idea.
//!
//! This crate implements the simplest scheme that actually works: one
//! exclusion lock per RCU domain. A reader enters its critical section by
//! acquiring the lock and leaves it by releasing it. A writer waits for a
//! grace period by acquiring that same lock and immediately releasing it.
//! Mutual exclusion gives a total order over all acquisitions, so by the
//! time the writer's acquisition succeeds, every reader that was
//! mid-section when the writer called in has provably released. That is the
//! entire trick: [`RcuLock::synchronize`] is a lock/unlock pair and nothing
//! else.
//!
//! The price is steep and worth knowing up front. Readers exclude each
//! other, so there is no read-side parallelism, and a reader that stalls
//! inside its critical section stalls every future writer with it. Keep
//! read-side sections short, never block in them on anything that could
//! wait on a writer, and never call [`synchronize`] while holding a
//! [`ReadGuard`] of the same instance; that last one is a guaranteed
//! self-deadlock. Schemes that lift these limits (per-thread counters,
//! quiescent-state tracking) exist, but they are different designs with
//! different costs, not variants of this one.
//!
//! Each [`RcuLock`] is an ordinary owned value, so tests and independent
//! subsystems can have their own isolated instances instead of sharing a
//! process-wide singleton.
//!
//! [`synchronize`]: RcuLock::synchronize
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::atomic::{AtomicPtr, Ordering};
//! use std::thread;
//!
//! type Rcu = rculock::RcuLock<rculock::Blocking>;
//!
//! struct Config {
//!     max_conns: usize,
//! }
//!
//! fn reader(rcu: &Rcu, current: &AtomicPtr<Config>) {
//!     for _ in 0..1000 {
//!         let guard = rcu.read_lock();
//!
//!         // SAFETY: the writer frees a Config only after synchronize()
//!         // returns, which cannot happen while `guard` is live.
//!         let config = unsafe { &*current.load(Ordering::Acquire) };
//!         assert!(config.max_conns > 0);
//!
//!         drop(guard);
//!     }
//! }
//!
//! fn writer(rcu: &Rcu, current: &AtomicPtr<Config>) {
//!     for n in 1..100 {
//!         let new = Box::into_raw(Box::new(Config { max_conns: n * 64 }));
//!
//!         // Publish the new version, then wait out the readers that might
//!         // still see the old one, then reclaim it.
//!         let old = current.swap(new, Ordering::AcqRel);
//!         rcu.synchronize();
//!         drop(unsafe { Box::from_raw(old) });
//!     }
//! }
//!
//! fn main() {
//!     let rcu = Rcu::new();
//!     let current = AtomicPtr::new(Box::into_raw(Box::new(Config {
//!         max_conns: 64,
//!     })));
//!
//!     thread::scope(|scope| {
//!         scope.spawn(|| reader(&rcu, &current));
//!         scope.spawn(|| writer(&rcu, &current));
//!     });
//!
//!     drop(unsafe { Box::from_raw(current.load(Ordering::Acquire)) });
//! }
//! ```
#![deny(missing_docs)]
#![warn(
	clippy::all,
	clippy::correctness,
	clippy::pedantic,
	clippy::cargo,
	clippy::nursery,
	clippy::perf,
	clippy::style
)]
#![allow(
	clippy::missing_panics_doc,
	clippy::significant_drop_tightening,
	clippy::needless_lifetimes
)]
#![cfg_attr(not(feature = "std"), no_std)]

mod cfg;

mod lock;
mod park;
mod rcu;

#[doc(inline)]
pub use self::park::*;

#[doc(inline)]
pub use self::rcu::{RcuLock, ReadGuard};
