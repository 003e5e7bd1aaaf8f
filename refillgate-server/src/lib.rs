//! # RefillGate Server
//!
//! A standalone quota tracking service with lazy refill and client
//! feedback hooks.
//!
//! ## Purpose
//!
//! The server guards one quota: a fixed attempt ceiling per identity key,
//! refilling a fixed amount per period. Callers ask "may this identity act
//! now?" before running protected work; the server answers with an
//! admit/deny decision plus the timestamps a client needs to render a
//! countdown:
//!
//! - on **deny**, the instant the identity may retry
//! - on the **last** admit before exhaustion, the instant the quota
//!   refills, so clients can warn the user ahead of time
//!
//! ## Quick Start
//!
//! ```bash
//! # 5 attempts per identity, 1 granted back every 60 seconds
//! refillgate --max-attempts 5 --refill-amount 1 --refill-period 60
//!
//! # Bounded memory: sweep fully-refilled records every 5 minutes
//! refillgate --store periodic --store-capacity 100000 --sweep-interval 300
//! ```
//!
//! ## Configuration
//!
//! Configure via CLI arguments or environment variables (CLI takes
//! precedence):
//!
//! ```bash
//! export REFILLGATE_PORT=8080
//! export REFILLGATE_MAX_ATTEMPTS=5
//! refillgate --refill-period 60   # CLI overrides env
//! ```
//!
//! ## HTTP API
//!
//! ### POST /check
//!
//! ```json
//! {"key": "signup:user:123"}
//! ```
//!
//! Admitted (200):
//!
//! ```json
//! {"allowed": true}
//! ```
//!
//! Admitted with the quota now drained (200):
//!
//! ```json
//! {"allowed": true, "ratelimit": {"refill_at": 1756100000000}}
//! ```
//!
//! Exceeded (429):
//!
//! ```json
//! {"allowed": false, "ratelimit": {"retry_at": 1756100000000}}
//! ```
//!
//! Timestamps are unix epoch milliseconds, ready for client-side countdown
//! persistence.
//!
//! ### GET /health
//!
//! Health check endpoint. Returns "OK" with 200 status.
//!
//! ### GET /metrics
//!
//! JSON snapshot of request counters.
//!
//! ## Architecture
//!
//! A single actor task owns the rate limiter; transports forward queries
//! over a channel, which serializes every check-and-consume sequence:
//!
//! ```text
//! ┌─────────────┐
//! │    HTTP     │
//! │  Transport  │
//! └──────┬──────┘
//!        │ mpsc
//! ┌──────▼──────┐
//! │    Actor    │
//! │ RateLimiter │
//! │    Store    │
//! └─────────────┘
//! ```

pub mod actor;
pub mod config;
pub mod metrics;
pub mod store;
pub mod transport;
pub mod types;
