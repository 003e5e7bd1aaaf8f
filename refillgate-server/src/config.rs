//! Server configuration and CLI argument parsing
//!
//! Configuration comes from CLI arguments with environment-variable
//! fallback (REFILLGATE_ prefix). Precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Default values (lowest priority)
//!
//! The quota parameters are validated eagerly at startup by constructing
//! the [`LimiterConfig`]; the server never starts with an unusable quota.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use refillgate::LimiterConfig;
use std::time::Duration;

/// Main configuration structure for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listener configuration
    pub http: HttpConfig,
    /// Validated quota refill parameters
    pub quota: LimiterConfig,
    /// Record store configuration
    pub store: StoreConfig,
    /// Channel buffer size for actor communication
    pub buffer_size: usize,
    /// Logging level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Record store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Which store implementation to use
    pub kind: StoreKind,
    /// Initial capacity of the store
    pub capacity: usize,
    /// Sweep interval for the periodic store
    pub sweep_interval: Duration,
}

/// Available record store implementations
///
/// - **Unbounded**: never evicts; memory grows with distinct identities
/// - **Periodic**: drops fully-refilled records at a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// Plain map, no eviction
    Unbounded,
    /// Fixed-interval sweep of fully-refilled records
    Periodic,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "unbounded" => Ok(StoreKind::Unbounded),
            "periodic" => Ok(StoreKind::Periodic),
            _ => Err(anyhow!(
                "Invalid store kind: {}. Valid options are: unbounded, periodic",
                s
            )),
        }
    }
}

/// Command-line arguments for the server
///
/// All arguments can also be set via environment variables with the
/// REFILLGATE_ prefix. CLI arguments take precedence.
#[derive(Parser, Debug)]
#[command(
    name = "refillgate",
    about = "Quota tracking service with lazy refill",
    long_about = "A quota tracking service with lazy refill and client feedback hooks.\n\nOne quota is configured per process: an attempt ceiling per identity key, refilling a fixed amount per period.\n\nEnvironment variables with REFILLGATE_ prefix are supported. CLI arguments take precedence over environment variables."
)]
pub struct Args {
    // HTTP listener
    #[arg(
        long,
        value_name = "HOST",
        help = "HTTP host",
        default_value = "127.0.0.1",
        env = "REFILLGATE_HOST"
    )]
    pub host: String,
    #[arg(
        long,
        value_name = "PORT",
        help = "HTTP port",
        default_value_t = 8080,
        env = "REFILLGATE_PORT"
    )]
    pub port: u16,

    // Quota parameters
    #[arg(
        long,
        value_name = "N",
        help = "Attempt ceiling per identity",
        default_value_t = 5,
        env = "REFILLGATE_MAX_ATTEMPTS"
    )]
    pub max_attempts: u32,
    #[arg(
        long,
        value_name = "N",
        help = "Attempts granted back per refill period",
        default_value_t = 1,
        env = "REFILLGATE_REFILL_AMOUNT"
    )]
    pub refill_amount: u32,
    #[arg(
        long,
        value_name = "SECS",
        help = "Refill period length (seconds)",
        default_value_t = 60,
        env = "REFILLGATE_REFILL_PERIOD"
    )]
    pub refill_period: u64,

    // Store configuration
    #[arg(
        long,
        value_name = "KIND",
        help = "Store kind: unbounded, periodic",
        default_value = "unbounded",
        env = "REFILLGATE_STORE"
    )]
    pub store: StoreKind,
    #[arg(
        long,
        value_name = "SIZE",
        help = "Initial store capacity",
        default_value_t = 10_000,
        env = "REFILLGATE_STORE_CAPACITY"
    )]
    pub store_capacity: usize,
    #[arg(
        long,
        value_name = "SECS",
        help = "Sweep interval for periodic store (seconds)",
        default_value_t = 300,
        env = "REFILLGATE_SWEEP_INTERVAL"
    )]
    pub sweep_interval: u64,

    // General options
    #[arg(
        long,
        value_name = "SIZE",
        help = "Channel buffer size",
        default_value_t = 1024,
        env = "REFILLGATE_BUFFER_SIZE"
    )]
    pub buffer_size: usize,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level: error, warn, info, debug, trace",
        default_value = "info",
        env = "REFILLGATE_LOG_LEVEL"
    )]
    pub log_level: String,
}

impl Config {
    /// Build configuration from environment variables and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if any quota parameter is zero or the sweep
    /// interval is zero while the periodic store is selected.
    pub fn from_env_and_args() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build and validate a config from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let quota = LimiterConfig::new(
            args.max_attempts,
            args.refill_amount,
            Duration::from_secs(args.refill_period),
        )
        .context("invalid quota parameters")?;

        if args.store == StoreKind::Periodic && args.sweep_interval == 0 {
            return Err(anyhow!("sweep interval must be positive"));
        }

        Ok(Config {
            http: HttpConfig {
                host: args.host,
                port: args.port,
            },
            quota,
            store: StoreConfig {
                kind: args.store,
                capacity: args.store_capacity,
                sweep_interval: Duration::from_secs(args.sweep_interval),
            },
            buffer_size: args.buffer_size,
            log_level: args.log_level,
        })
    }
}
