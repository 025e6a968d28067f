//! HTTP endpoint for metrics scraping and liveness probes.
//!
//! - `GET /metrics`: Prometheus text format.
//! - `GET /healthz`: `ok <n> online`, with `n` read from the registry.

use crate::state::Hub;
use axum::extract::State;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;

async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

async fn health_handler(State(hub): State<Arc<Hub>>) -> String {
    format!("ok {} online", hub.registry.len())
}

fn router(hub: Arc<Hub>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(health_handler))
        .with_state(hub)
}

/// Serve the metrics endpoint on `addr` until the process exits.
///
/// Bind failures are logged and end the task; the relay keeps running.
pub async fn run_http_server(addr: SocketAddr, hub: Arc<Hub>) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind metrics endpoint");
            return;
        }
    };
    tracing::info!(%addr, "Metrics endpoint listening");

    if let Err(e) = axum::serve(listener, router(hub)).await {
        tracing::error!(error = %e, "Metrics endpoint error");
    }
}
