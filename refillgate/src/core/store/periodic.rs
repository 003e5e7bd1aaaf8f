use super::{QuotaRecord, Store};
use std::time::{Duration, SystemTime};

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

// Configuration constants
const DEFAULT_CAPACITY: usize = 1000;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

/// Fixed-interval sweeping store implementation
///
/// Keeps memory bounded over long process lifetimes by dropping records
/// that have fully refilled. Each record carries an expiry (set from the
/// ttl the limiter computes on write); a sweep at a fixed interval retains
/// only records whose expiry is still in the future.
///
/// Eviction never changes observable limiter behavior: a record past its
/// expiry would refill to `max_attempts` on its next query anyway, which
/// is exactly the state a missing record is recreated in. `get` also
/// refuses to return lapsed records, so behavior does not depend on sweep
/// timing.
///
/// # Example
///
/// ```
/// use refillgate::PeriodicStore;
/// use std::time::Duration;
///
/// let store = PeriodicStore::builder()
///     .capacity(100_000)
///     .sweep_interval(Duration::from_secs(300))
///     .build();
/// ```
pub struct PeriodicStore {
    data: HashMap<String, (QuotaRecord, SystemTime)>,
    // When the next sweep is due
    next_sweep: SystemTime,
    sweep_interval: Duration,
    // Entries removed by the last sweep
    swept_count: usize,
}

/// Builder for configuring a [`PeriodicStore`]
pub struct PeriodicStoreBuilder {
    capacity: usize,
    sweep_interval: Duration,
}

impl PeriodicStore {
    /// Create a store with default capacity and a 5 minute sweep interval
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_CAPACITY,
            Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        )
    }

    /// Create a new builder for configuring a PeriodicStore
    pub fn builder() -> PeriodicStoreBuilder {
        PeriodicStoreBuilder::new()
    }

    fn with_config(capacity: usize, sweep_interval: Duration) -> Self {
        PeriodicStore {
            data: HashMap::with_capacity(capacity),
            next_sweep: SystemTime::now() + sweep_interval,
            sweep_interval,
            swept_count: 0,
        }
    }

    /// Number of identities currently tracked
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no records are tracked
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn swept_count(&self) -> usize {
        self.swept_count
    }

    fn maybe_sweep(&mut self, now: SystemTime) {
        if now < self.next_sweep {
            return;
        }
        let before = self.data.len();
        self.data.retain(|_, (_, expiry)| *expiry > now);
        self.swept_count = before.saturating_sub(self.data.len());
        self.next_sweep = now + self.sweep_interval;
    }
}

impl Default for PeriodicStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for PeriodicStore {
    fn get(&self, key: &str, now: SystemTime) -> Option<QuotaRecord> {
        match self.data.get(key) {
            Some((record, expiry)) if *expiry > now => Some(*record),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, record: QuotaRecord, ttl: Duration, now: SystemTime) {
        // Sweep on the write path only, at most once per interval
        self.maybe_sweep(now);
        self.data.insert(key.to_string(), (record, now + ttl));
    }
}

impl Default for PeriodicStoreBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl PeriodicStoreBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expected capacity (number of tracked identities)
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the interval between sweeps
    ///
    /// Shorter intervals hold memory closer to the live working set at the
    /// cost of more frequent full-map scans.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Build the PeriodicStore with the configured settings
    pub fn build(self) -> PeriodicStore {
        PeriodicStore::with_config(self.capacity, self.sweep_interval)
    }
}
