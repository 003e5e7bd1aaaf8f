//! Common types shared between the transport layer and the actor
//!
//! The wire shapes mirror what a client-side countdown needs: a boolean
//! decision plus, when relevant, a single epoch-milliseconds timestamp to
//! persist and count down against.

use refillgate::Verdict;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Quota check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Identity key to check, typically a resource+principal composite
    /// (e.g. "signup:user:123")
    pub key: String,
}

/// Quota check response
///
/// `ratelimit` is present in exactly two situations:
/// - the request was denied: `retry_at` says when to try again
/// - the request was admitted but drained the last attempt: `refill_at`
///   lets the client warn the user before the next request fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Whether the identity may act now
    pub allowed: bool,
    /// Countdown feedback, omitted when there is nothing to warn about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratelimit: Option<RateLimitInfo>,
}

/// Countdown feedback attached to a [`CheckResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// When the quota refills (unix ms); set on a warning admit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refill_at: Option<u64>,
    /// When a retry can succeed (unix ms); set on a denied request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_at: Option<u64>,
}

/// Convert a timestamp to unix epoch milliseconds
///
/// Pre-epoch timestamps clamp to zero; they can only arise from a
/// pathological system clock and zero is a safe "retry immediately".
pub fn unix_millis(at: SystemTime) -> u64 {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl From<Verdict> for CheckResponse {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Admitted {
                should_warn: false, ..
            } => CheckResponse {
                allowed: true,
                ratelimit: None,
            },
            Verdict::Admitted {
                should_warn: true,
                refill_at,
            } => CheckResponse {
                allowed: true,
                ratelimit: Some(RateLimitInfo {
                    refill_at: Some(unix_millis(refill_at)),
                    retry_at: None,
                }),
            },
            Verdict::Exceeded { retry_at } => CheckResponse {
                allowed: false,
                ratelimit: Some(RateLimitInfo {
                    refill_at: None,
                    retry_at: Some(unix_millis(retry_at)),
                }),
            },
        }
    }
}
