//! Integration tests for the exporter endpoints
//!
//! These tests verify that:
//! - Probe events flow through the gauges to the /metrics endpoint
//! - /health responds
//! - The exporter binds and serves on a real socket

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use memprobe::actors::probe::ProbeHandle;
use memprobe::exporter::{UseGauges, router, spawn_exporter, update_loop};
use tokio::sync::broadcast;
use tower::ServiceExt;

use crate::helpers::{ScriptedSource, create_test_config, create_test_snapshot};

async fn get_body(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn probe_events_reach_the_metrics_endpoint() {
    let source = ScriptedSource::new([create_test_snapshot(1024 * 1024, 512 * 1024, 0)]);
    let (event_tx, _) = broadcast::channel(16);

    let gauges = UseGauges::new().unwrap();
    tokio::spawn(update_loop(gauges.clone(), event_tx.subscribe()));

    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);
    handle.poll_now().await.unwrap();

    // give the update loop a moment to apply the event
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = get_body(router(gauges), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("memprobe_mem_metrics{use=\"utilization\"} 50"));
    assert!(body.contains("memprobe_mem_usage{mem=\"memtotal\"} 1024"));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let gauges = UseGauges::new().unwrap();

    let (status, body) = get_body(router(gauges), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn exporter_binds_on_an_ephemeral_port() {
    let (event_tx, _) = broadcast::channel(16);
    let gauges = UseGauges::new().unwrap();

    let addr = spawn_exporter(
        "127.0.0.1:0".parse().unwrap(),
        gauges,
        event_tx.subscribe(),
    )
    .await
    .unwrap();

    assert_eq!(addr.ip().to_string(), "127.0.0.1");
    assert_ne!(addr.port(), 0);
}
