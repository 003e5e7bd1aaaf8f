//! Store factory for creating the limiter actor
//!
//! Chooses the record store implementation from configuration and spawns
//! the actor that owns it.
//!
//! # Store Kinds
//!
//! ## Unbounded
//! - Records are never deleted
//! - Best for: a bounded identity universe (user ids, action names)
//!
//! ## Periodic
//! - Fully-refilled records are swept at a fixed interval
//! - Best for: long-lived processes with many distinct identities

use crate::actor::{LimiterActor, LimiterHandle};
use crate::config::{Config, StoreKind};
use crate::metrics::Metrics;
use refillgate::{PeriodicStore, UnboundedStore};
use std::sync::Arc;

/// Create a limiter actor with the configured store
pub fn create_limiter(config: &Config, metrics: Arc<Metrics>) -> LimiterHandle {
    match config.store.kind {
        StoreKind::Unbounded => {
            let store = UnboundedStore::with_capacity(config.store.capacity);
            LimiterActor::spawn_unbounded(config.buffer_size, config.quota, store, metrics)
        }
        StoreKind::Periodic => {
            let store = PeriodicStore::builder()
                .capacity(config.store.capacity)
                .sweep_interval(config.store.sweep_interval)
                .build();
            LimiterActor::spawn_periodic(config.buffer_size, config.quota, store, metrics)
        }
    }
}
