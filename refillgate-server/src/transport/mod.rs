//! Transport layer for the quota tracking server
//!
//! Transports accept client connections, parse protocol-specific requests,
//! forward them to the limiter actor, and render verdicts back to clients.
//! All transports implement the [`Transport`] trait and share the same
//! limiter state via the actor.

pub mod http;


use crate::actor::LimiterHandle;
use anyhow::Result;
use async_trait::async_trait;

/// Common interface for transport implementations
#[async_trait]
pub trait Transport {
    /// Start the transport server
    ///
    /// Binds to the configured address, accepts connections, and handles
    /// requests using the provided limiter handle. Runs indefinitely until
    /// an error occurs or the server shuts down.
    async fn start(self, limiter: LimiterHandle) -> Result<()>;
}
