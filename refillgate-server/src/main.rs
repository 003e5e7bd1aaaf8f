use anyhow::Result;
use std::sync::Arc;

use refillgate_server::config::Config;
use refillgate_server::metrics::Metrics;
use refillgate_server::store;
use refillgate_server::transport::{Transport, http::HttpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse configuration from environment variables and CLI arguments
    let config = Config::from_env_and_args()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("refillgate={}", config.log_level).parse()?)
                .add_directive(format!("refillgate_server={}", config.log_level).parse()?),
        )
        .init();

    let metrics = Arc::new(Metrics::new());

    // Create the limiter actor with the configured store
    let limiter = store::create_limiter(&config, metrics.clone());

    tracing::info!(
        "RefillGate started: {} attempts per identity, {} back every {:?} ({:?} store)",
        config.quota.max_attempts(),
        config.quota.refill_amount(),
        config.quota.refill_period(),
        config.store.kind
    );

    let transport = HttpTransport::new(&config.http.host, config.http.port, metrics);
    transport.start(limiter).await
}
