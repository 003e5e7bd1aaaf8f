//! # RefillGate
//!
//! A lazy-refill, per-identity quota tracking library.
//!
//! ## Overview
//!
//! RefillGate answers two questions for any identity key: "is this identity
//! allowed to act now?" and "how much quota remains / when does it refill?".
//! It does so with:
//! - **Lazy refill**: elapsed-period credit is computed at query time, so
//!   there is no background timer and zero idle cost
//! - **Decrement-on-admit**: checking and consuming quota is one atomic
//!   step, so concurrent callers can never over-draw an identity
//! - **Warn-before-exhaustion**: the admit that drains the last attempt is
//!   flagged, so callers can tell users the quota is nearly gone
//! - **Memory efficiency**: O(1) space per identity key
//!
//! ## Quick Start
//!
//! ```
//! use refillgate::{LimiterConfig, RateLimiter, UnboundedStore, Verdict};
//! use std::time::{Duration, SystemTime};
//!
//! // 5 attempts, refilling 1 attempt every 60 seconds
//! let config = LimiterConfig::new(5, 1, Duration::from_secs(60)).unwrap();
//! let mut limiter = RateLimiter::new(config, UnboundedStore::new());
//!
//! match limiter.query("user:123", SystemTime::now()) {
//!     Verdict::Admitted { should_warn, .. } => {
//!         if should_warn {
//!             println!("Allowed, but that was the last attempt for a while");
//!         }
//!     }
//!     Verdict::Exceeded { retry_at } => {
//!         println!("Rate limited until {retry_at:?}");
//!     }
//! }
//! ```
//!
//! ## Store Types
//!
//! The limiter is generic over a [`Store`] that owns the per-identity
//! records:
//!
//! ### [`UnboundedStore`]
//! A plain map that never evicts. The default; matches the core contract
//! that the registry itself never deletes records.
//!
//! ```
//! use refillgate::UnboundedStore;
//!
//! let store = UnboundedStore::with_capacity(10_000);
//! ```
//!
//! ### [`PeriodicStore`]
//! Sweeps fully-refilled records at a fixed interval, bounding memory over
//! long process lifetimes with many distinct identities. Eviction is pure
//! policy: a swept record is indistinguishable from a fresh one, so the
//! observable behavior of the limiter does not change.
//!
//! ```
//! use refillgate::PeriodicStore;
//! use std::time::Duration;
//!
//! let store = PeriodicStore::builder()
//!     .capacity(100_000)
//!     .sweep_interval(Duration::from_secs(300))
//!     .build();
//! ```
//!
//! ## Thread Safety
//!
//! [`RateLimiter`] itself takes `&mut self` and is not thread-safe. For
//! concurrent access use [`SharedLimiter`], which serializes the whole
//! read-modify-write sequence of each query behind one lock:
//!
//! ```
//! use refillgate::{LimiterConfig, RateLimiter, SharedLimiter, UnboundedStore};
//! use std::time::Duration;
//!
//! let config = LimiterConfig::new(5, 1, Duration::from_secs(60)).unwrap();
//! let limiter = SharedLimiter::new(RateLimiter::new(config, UnboundedStore::new()));
//! let for_another_thread = limiter.clone();
//! ```
//!
//! ## Features
//!
//! - `ahash` (default): Use AHash for faster hashing

pub mod core;

pub use core::{
    ConfigError, LimiterConfig, PeriodicStore, PeriodicStoreBuilder, QuotaRecord, RateLimiter,
    SharedLimiter, Store, UnboundedStore, Verdict,
};
