//! Core components of the refillgate quota tracking library
//!
//! This module contains the fundamental building blocks:
//! - [`limiter`]: The lazy-refill rate limiter and its configuration
//! - [`shared`]: A thread-safe wrapper for concurrent callers
//! - [`store`]: Storage backends for per-identity quota records

pub mod limiter;
pub mod shared;
pub mod store;

#[cfg(test)]
mod tests;

pub use limiter::{LimiterConfig, RateLimiter, Verdict};
pub use shared::SharedLimiter;
pub use store::{
    PeriodicStore, PeriodicStoreBuilder, QuotaRecord, Store, UnboundedStore,
};

use std::error::Error;
use std::fmt;

/// Errors raised when constructing a [`LimiterConfig`]
///
/// All variants are construction-time contract violations: a limiter must
/// not be usable in an invalid configuration, so bad parameters are
/// rejected eagerly rather than surfaced from `query`.
///
/// # Example
///
/// ```
/// use refillgate::{ConfigError, LimiterConfig};
/// use std::time::Duration;
///
/// match LimiterConfig::new(0, 1, Duration::from_secs(60)) {
///     Err(ConfigError::ZeroMaxAttempts) => println!("max_attempts must be positive"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_attempts` was zero
    ZeroMaxAttempts,
    /// `refill_amount` was zero
    ZeroRefillAmount,
    /// `refill_period` was a zero duration
    ZeroRefillPeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxAttempts => write!(f, "max_attempts must be positive"),
            ConfigError::ZeroRefillAmount => write!(f, "refill_amount must be positive"),
            ConfigError::ZeroRefillPeriod => write!(f, "refill_period must be a non-zero duration"),
        }
    }
}

impl Error for ConfigError {}
