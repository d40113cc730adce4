//! HTTP endpoint serving the exported gauges

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;
use tracing::{info, trace, warn};

use super::gauges::UseGauges;
use crate::actors::messages::ProbeEvent;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

/// Build the exporter router
pub fn router(gauges: UseGauges) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/health", get(health))
        .with_state(gauges)
        .layer(TraceLayer::new_for_http())
}

/// GET /metrics
///
/// Prometheus text exposition of the registered gauges
async fn metrics(State(gauges): State<UseGauges>) -> Response {
    match gauges.encode() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /health
///
/// Returns a simple health check response
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Spawn the exporter
///
/// Subscribes the gauges to probe events and starts the Axum HTTP server in
/// a background task. Returns the server's local address.
pub async fn spawn_exporter(
    bind_addr: SocketAddr,
    gauges: UseGauges,
    events: broadcast::Receiver<ProbeEvent>,
) -> anyhow::Result<SocketAddr> {
    tokio::spawn(update_loop(gauges.clone(), events));

    let app = router(gauges);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let addr = listener.local_addr()?;

    info!("exporter listening on {addr}");

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            warn!("exporter server stopped: {e}");
        }
    });

    Ok(addr)
}

/// Feed published probe events into the gauges.
///
/// Runs until the event channel closes. `spawn_exporter` starts this
/// automatically; it is public so the gauges can be wired up without
/// binding a socket.
pub async fn update_loop(gauges: UseGauges, mut events: broadcast::Receiver<ProbeEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => gauges.update(&event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("exporter lagged, skipped {skipped} events");
            }
            Err(broadcast::error::RecvError::Closed) => {
                trace!("event channel closed, exporter update loop stopping");
                break;
            }
        }
    }
}
