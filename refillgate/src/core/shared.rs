//! Thread-safe wrapper for concurrent callers
//!
//! [`RateLimiter`] takes `&mut self`; this module provides the coarse-lock
//! sharing variant: one mutex around the whole limiter, making each query's
//! read-modify-write sequence a single critical section. The section holds
//! no I/O and does not suspend, so it is short and bounded.

use super::limiter::{RateLimiter, Verdict};
use super::store::Store;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// Cloneable handle to a mutex-guarded [`RateLimiter`]
///
/// Clones share the same underlying limiter and record store. Two
/// concurrent queries for the same identity can never both observe the
/// same remaining-attempt count: admission and decrement happen under one
/// lock acquisition.
///
/// # Example
///
/// ```
/// use refillgate::{LimiterConfig, RateLimiter, SharedLimiter, UnboundedStore};
/// use std::time::{Duration, SystemTime};
///
/// let config = LimiterConfig::new(10, 1, Duration::from_secs(60)).unwrap();
/// let limiter = SharedLimiter::new(RateLimiter::new(config, UnboundedStore::new()));
///
/// let handle = limiter.clone();
/// std::thread::spawn(move || {
///     handle.query("user:123", SystemTime::now());
/// })
/// .join()
/// .unwrap();
/// ```
pub struct SharedLimiter<S: Store> {
    inner: Arc<Mutex<RateLimiter<S>>>,
}

impl<S: Store> Clone for SharedLimiter<S> {
    fn clone(&self) -> Self {
        SharedLimiter {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Store> SharedLimiter<S> {
    /// Wrap a limiter for shared use
    pub fn new(limiter: RateLimiter<S>) -> Self {
        SharedLimiter {
            inner: Arc::new(Mutex::new(limiter)),
        }
    }

    /// Serialized [`RateLimiter::query`]
    ///
    /// A poisoned lock is recovered: a query either fully committed or
    /// left the record untouched, so there is no torn state to observe.
    pub fn query(&self, key: &str, now: SystemTime) -> Verdict {
        let mut limiter = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter.query(key, now)
    }
}
