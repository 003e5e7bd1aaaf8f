//! Actor owning the rate limiter
//!
//! One task owns the limiter and its record store; transports talk to it
//! through a channel. Because the actor processes one message at a time,
//! every check-and-consume sequence is serialized without any locking in
//! the transports.

use crate::metrics::Metrics;
use anyhow::Result;
use refillgate::{LimiterConfig, PeriodicStore, RateLimiter, Store, UnboundedStore, Verdict};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::{mpsc, oneshot};

/// Message types for the limiter actor
pub enum LimiterMessage {
    Check {
        key: String,
        response_tx: oneshot::Sender<Verdict>,
    },
}

/// Handle to communicate with the limiter actor
#[derive(Clone)]
pub struct LimiterHandle {
    tx: mpsc::Sender<LimiterMessage>,
}

impl LimiterHandle {
    /// Check and, on admit, consume one attempt for `key`
    pub async fn check(&self, key: String) -> Result<Verdict> {
        let (response_tx, response_rx) = oneshot::channel();

        self.tx
            .send(LimiterMessage::Check { key, response_tx })
            .await
            .map_err(|_| anyhow::anyhow!("Limiter actor has shut down"))?;

        response_rx
            .await
            .map_err(|_| anyhow::anyhow!("Limiter actor dropped response channel"))
    }
}

/// The limiter actor
pub struct LimiterActor;

impl LimiterActor {
    /// Spawn an actor over a non-evicting store
    pub fn spawn_unbounded(
        buffer_size: usize,
        config: LimiterConfig,
        store: UnboundedStore,
        metrics: Arc<Metrics>,
    ) -> LimiterHandle {
        Self::spawn(buffer_size, RateLimiter::new(config, store), metrics)
    }

    /// Spawn an actor over a periodically-sweeping store
    pub fn spawn_periodic(
        buffer_size: usize,
        config: LimiterConfig,
        store: PeriodicStore,
        metrics: Arc<Metrics>,
    ) -> LimiterHandle {
        Self::spawn(buffer_size, RateLimiter::new(config, store), metrics)
    }

    fn spawn<S: Store + Send + 'static>(
        buffer_size: usize,
        limiter: RateLimiter<S>,
        metrics: Arc<Metrics>,
    ) -> LimiterHandle {
        let (tx, rx) = mpsc::channel(buffer_size);

        tokio::spawn(async move {
            run_actor(rx, limiter, metrics).await;
        });

        LimiterHandle { tx }
    }
}

async fn run_actor<S: Store>(
    mut rx: mpsc::Receiver<LimiterMessage>,
    mut limiter: RateLimiter<S>,
    metrics: Arc<Metrics>,
) {
    while let Some(msg) = rx.recv().await {
        match msg {
            LimiterMessage::Check { key, response_tx } => {
                let verdict = limiter.query(&key, SystemTime::now());
                metrics.record(&verdict);
                // Ignore send errors - requester may have timed out
                let _ = response_tx.send(verdict);
            }
        }
    }

    tracing::info!("Limiter actor shutting down");
}
