//! Lazy-refill rate limiter implementation
//!
//! This module provides the main [`RateLimiter`] struct, which tracks a
//! bounded attempt count per identity key and lazily credits elapsed refill
//! periods at query time. There is no background timer and no sweeper
//! thread; the trade-off is that retry/refill timestamps are only as fresh
//! as the last query for an identity, which is fine because any later query
//! recomputes them.

use super::ConfigError;
use super::store::{QuotaRecord, Store};
use std::time::{Duration, SystemTime};

/// Immutable refill parameters for a [`RateLimiter`]
///
/// A config binds three positive values: the attempt ceiling, the number of
/// attempts granted back per refill period, and the period length. Multiple
/// limiters with different configs may coexist; they share no state.
///
/// # Example
///
/// ```
/// use refillgate::LimiterConfig;
/// use std::time::Duration;
///
/// // 3 attempts, all 3 granted back every 60 seconds
/// let config = LimiterConfig::new(3, 3, Duration::from_secs(60)).unwrap();
/// assert_eq!(config.max_attempts(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LimiterConfig {
    max_attempts: u32,
    refill_amount: u32,
    refill_period: Duration,
}

impl LimiterConfig {
    /// Create a validated config
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any parameter is zero. Validation
    /// happens here and nowhere else: a constructed config is always
    /// usable, and `query` has no failure modes of its own.
    pub fn new(
        max_attempts: u32,
        refill_amount: u32,
        refill_period: Duration,
    ) -> Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        if refill_amount == 0 {
            return Err(ConfigError::ZeroRefillAmount);
        }
        if refill_period.is_zero() {
            return Err(ConfigError::ZeroRefillPeriod);
        }

        Ok(LimiterConfig {
            max_attempts,
            refill_amount,
            refill_period,
        })
    }

    /// Ceiling on attempts available to one identity
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Attempts granted back per elapsed refill period
    pub fn refill_amount(&self) -> u32 {
        self.refill_amount
    }

    /// Length of one refill period
    pub fn refill_period(&self) -> Duration {
        self.refill_period
    }
}

/// Outcome of a single quota query
///
/// Quota exhaustion is an expected, recoverable condition, so it is a
/// first-class variant rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The identity may act; one attempt was consumed
    Admitted {
        /// True when this admit drained the last remaining attempt
        should_warn: bool,
        /// When the next refill period completes, relative to this admit
        refill_at: SystemTime,
    },
    /// The identity is out of attempts
    Exceeded {
        /// Earliest instant at which a retry can succeed
        retry_at: SystemTime,
    },
}

impl Verdict {
    /// True for [`Verdict::Admitted`]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Verdict::Admitted { .. })
    }
}

/// Lazy-refill rate limiter
///
/// Owns a [`Store`] of per-identity [`QuotaRecord`]s bound to one
/// [`LimiterConfig`]. Each query fetches (or creates) the identity's
/// record, credits any whole refill periods that elapsed since the last
/// consumption, and either admits (consuming one attempt in the same step)
/// or rejects with a retry timestamp.
///
/// # Example
///
/// ```
/// use refillgate::{LimiterConfig, RateLimiter, UnboundedStore};
/// use std::time::{Duration, SystemTime};
///
/// let config = LimiterConfig::new(5, 1, Duration::from_secs(60)).unwrap();
/// let mut limiter = RateLimiter::new(config, UnboundedStore::new());
///
/// let verdict = limiter.query("user:123", SystemTime::now());
/// assert!(verdict.is_admitted());
/// ```
pub struct RateLimiter<S: Store> {
    config: LimiterConfig,
    store: S,
}

impl<S: Store> RateLimiter<S> {
    /// Create a new limiter over an empty record store
    pub fn new(config: LimiterConfig, store: S) -> Self {
        RateLimiter { config, store }
    }

    /// The config this limiter was constructed with
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Check and, on admit, consume one attempt for `key`
    ///
    /// The whole read-modify-write sequence runs inside this call with no
    /// suspension and no I/O; callers that share a limiter across threads
    /// must serialize calls (see [`SharedLimiter`](super::SharedLimiter)).
    ///
    /// `now` is caller-supplied so tests can drive simulated time. A `now`
    /// earlier than the record's last consumption counts as zero elapsed
    /// periods.
    ///
    /// # Semantics
    ///
    /// - A never-before-seen key starts with `max_attempts` available.
    /// - Elapsed whole periods since the last consumption credit
    ///   `refill_amount` attempts each, capped at `max_attempts`. The
    ///   refill anchor only advances on an admitting query, so the next
    ///   refill instant stays computable relative to the last consumption.
    /// - With zero attempts left the query is [`Verdict::Exceeded`] and
    ///   the record is untouched; repeated exceeded queries before
    ///   `retry_at` report the same `retry_at`.
    /// - Otherwise the query admits: one attempt is consumed and the
    ///   refill anchor moves to `now`, in the same step. The admit that
    ///   reaches zero remaining sets `should_warn`.
    pub fn query(&mut self, key: &str, now: SystemTime) -> Verdict {
        let period = self.config.refill_period;

        let mut record = self.store.get(key, now).unwrap_or(QuotaRecord {
            attempts_remaining: self.config.max_attempts,
            last_refill: now,
        });

        // Credit elapsed whole periods. Clock regressions read as zero.
        let elapsed = now
            .duration_since(record.last_refill)
            .unwrap_or(Duration::ZERO);
        let elapsed_periods = (elapsed.as_nanos() / period.as_nanos()) as u64;
        if elapsed_periods > 0 {
            let credit = elapsed_periods.saturating_mul(u64::from(self.config.refill_amount));
            record.attempts_remaining = (u64::from(record.attempts_remaining) + credit)
                .min(u64::from(self.config.max_attempts))
                as u32;
        }

        if record.attempts_remaining == 0 {
            // Exhausted implies no period elapsed (any elapsed period
            // credits at least one attempt), so nothing needs persisting.
            return Verdict::Exceeded {
                retry_at: record.last_refill + period,
            };
        }

        record.attempts_remaining -= 1;
        record.last_refill = record.last_refill.max(now);
        let refill_at = record.last_refill + period;

        let ttl = self.time_to_full(record.attempts_remaining);
        self.store.set(key, record, ttl, now);

        Verdict::Admitted {
            should_warn: record.attempts_remaining == 0,
            refill_at,
        }
    }

    /// Duration after which a record with `attempts` remaining is fully
    /// refilled and indistinguishable from a fresh one
    ///
    /// Evicting stores use this as the record's time-to-live.
    fn time_to_full(&self, attempts: u32) -> Duration {
        let missing = self.config.max_attempts - attempts;
        let periods = missing.div_ceil(self.config.refill_amount).max(1);
        self.config.refill_period * periods
    }
}
