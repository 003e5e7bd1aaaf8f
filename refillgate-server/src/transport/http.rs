//! HTTP/JSON transport
//!
//! # API Endpoints
//!
//! ## POST /check
//!
//! Check and, on admit, consume one attempt for an identity key.
//!
//! ### Request Body
//!
//! ```json
//! {"key": "signup:user:123"}
//! ```
//!
//! ### Responses
//!
//! Admitted (200); `ratelimit` appears only on the admit that drains the
//! last attempt:
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
//! An empty key is rejected with 400 before reaching the limiter.
//!
//! ## GET /health
//!
//! Health check endpoint. Returns "OK" with 200 status.
//!
//! ## GET /metrics
//!
//! JSON snapshot of the server counters.

use super::Transport;
use crate::actor::LimiterHandle;
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::types::{CheckRequest, CheckResponse};
use anyhow::Result;
use async_trait::async_trait;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get, routing::post};
use refillgate::Verdict;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error message
    pub error: String,
}

/// HTTP transport implementation
pub struct HttpTransport {
    addr: SocketAddr,
    metrics: Arc<Metrics>,
}

impl HttpTransport {
    pub fn new(host: &str, port: u16, metrics: Arc<Metrics>) -> Self {
        let addr = format!("{host}:{port}").parse().expect("Invalid address");
        Self { addr, metrics }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn start(self, limiter: LimiterHandle) -> Result<()> {
        let app_state = Arc::new(AppState {
            limiter,
            metrics: self.metrics,
        });

        let app = Router::new()
            .route("/check", post(handle_check))
            .route("/metrics", get(handle_metrics))
            .route("/health", get(|| async { "OK" }))
            .with_state(app_state);

        tracing::info!("HTTP server listening on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

struct AppState {
    limiter: LimiterHandle,
    metrics: Arc<Metrics>,
}

async fn handle_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckRequest>,
) -> Result<(StatusCode, Json<CheckResponse>), (StatusCode, Json<HttpErrorResponse>)> {
    if req.key.is_empty() {
        state.metrics.record_rejected_input();
        return Err((
            StatusCode::BAD_REQUEST,
            Json(HttpErrorResponse {
                error: "key must not be empty".to_string(),
            }),
        ));
    }

    match state.limiter.check(req.key).await {
        Ok(verdict) => {
            let status = match verdict {
                Verdict::Admitted { .. } => StatusCode::OK,
                Verdict::Exceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            };
            Ok((status, Json(CheckResponse::from(verdict))))
        }
        Err(e) => {
            tracing::error!("Limiter error: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HttpErrorResponse {
                    error: format!("Internal server error: {e}"),
                }),
            ))
        }
    }
}

async fn handle_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
