use super::{QuotaRecord, Store};
use std::time::{Duration, SystemTime};

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

const DEFAULT_CAPACITY: usize = 1000;

/// Non-evicting store implementation
///
/// A plain map from identity key to record. Records are never deleted,
/// matching the core contract; memory grows with the number of distinct
/// identities ever seen. Suitable for a bounded identity universe (user
/// ids, action names) or for tests. For long-lived processes with
/// unbounded identities, prefer [`PeriodicStore`](super::PeriodicStore).
///
/// # Example
///
/// ```
/// use refillgate::{LimiterConfig, RateLimiter, UnboundedStore};
/// use std::time::Duration;
///
/// let config = LimiterConfig::new(5, 1, Duration::from_secs(60)).unwrap();
/// let limiter = RateLimiter::new(config, UnboundedStore::with_capacity(10_000));
/// ```
pub struct UnboundedStore {
    data: HashMap<String, QuotaRecord>,
}

impl UnboundedStore {
    /// Create an empty store with a small default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store sized for `capacity` identities
    pub fn with_capacity(capacity: usize) -> Self {
        UnboundedStore {
            data: HashMap::with_capacity(capacity),
        }
    }

    /// Number of identities tracked
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no identity has committed a query yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for UnboundedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for UnboundedStore {
    fn get(&self, key: &str, _now: SystemTime) -> Option<QuotaRecord> {
        self.data.get(key).copied()
    }

    fn set(&mut self, key: &str, record: QuotaRecord, _ttl: Duration, _now: SystemTime) {
        self.data.insert(key.to_string(), record);
    }
}
