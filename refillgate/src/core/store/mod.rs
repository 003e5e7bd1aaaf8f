use std::time::{Duration, SystemTime};

mod periodic;
mod unbounded;

pub use periodic::{PeriodicStore, PeriodicStoreBuilder};
pub use unbounded::UnboundedStore;

#[cfg(test)]
mod sweep_test;

/// Per-identity quota state
///
/// One record exists per identity key. `last_refill` marks the last moment
/// the remaining-attempt count was authoritative; it only moves forward on
/// an admitting query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaRecord {
    /// Attempts left, always within `[0, max_attempts]`
    pub attempts_remaining: u32,
    /// Anchor for refill-period arithmetic
    pub last_refill: SystemTime,
}

/// Store trait for per-identity quota records
///
/// The limiter owns its store exclusively; no other component mutates
/// records. `ttl` on [`set`](Store::set) is the duration after which the
/// record is fully refilled and therefore safe to drop without changing
/// observable behavior — evicting stores may use it, non-evicting stores
/// ignore it.
pub trait Store {
    /// Fetch the record for `key`, or `None` if absent (or dropped as
    /// fully refilled)
    fn get(&self, key: &str, now: SystemTime) -> Option<QuotaRecord>;

    /// Persist the record for `key`
    fn set(&mut self, key: &str, record: QuotaRecord, ttl: Duration, now: SystemTime);
}
