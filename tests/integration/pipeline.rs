//! End-to-end tests for the tick pipeline: source → normalize → evaluate → event

use std::time::Duration;

use memprobe::actors::probe::ProbeHandle;
use memprobe::config::SaturationKind;
use memprobe::{AlertCause, AlertLevel};
use tokio::sync::broadcast;

use crate::helpers::{ScriptedSource, create_test_config, create_test_snapshot};

#[tokio::test]
async fn nominal_tick_flows_through_to_a_quiet_event() {
    let source = ScriptedSource::new([create_test_snapshot(1000, 500, 0)]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    handle.poll_now().await.unwrap();

    let event = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.metrics.utilization, 50.0);
    assert_eq!(event.metrics.indicator, 50.0);
    assert_eq!(event.metrics.errors, 0.0);
    assert_eq!(event.verdict.level, AlertLevel::None);
    assert!(!event.verdict.triggered);
    assert_eq!(event.snapshot.total, 1000);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn utilization_above_engineered_point_produces_a_fatal_event() {
    // 95% utilization with default thresholds: fatal wins over the design warn
    let source = ScriptedSource::new([create_test_snapshot(1000, 50, 0)]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    handle.poll_now().await.unwrap();

    let event = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.verdict.level, AlertLevel::Fatal);
    assert_eq!(event.verdict.cause, Some(AlertCause::ExcessiveResource));
    assert!(event.verdict.triggered);
    assert_eq!(event.verdict.message, "overall mem above engineered point");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn low_utilization_produces_a_low_resource_warning() {
    let source = ScriptedSource::new([create_test_snapshot(1000, 950, 0)]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    handle.poll_now().await.unwrap();

    let event = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.verdict.level, AlertLevel::Warn);
    assert_eq!(event.verdict.cause, Some(AlertCause::LowResource));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn saturation_strategy_from_config_drives_the_event() {
    let mut config = create_test_config();
    config.saturation = SaturationKind::DesignRatio;

    // 56% utilization against a design threshold of 70
    let source = ScriptedSource::new([create_test_snapshot(1000, 440, 0)]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &config, event_tx);

    handle.poll_now().await.unwrap();

    let event = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert!((event.metrics.saturation - 100.0 * 56.0 / 70.0).abs() < 1e-9);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn zero_total_tick_fails_without_publishing() {
    let source = ScriptedSource::new([create_test_snapshot(0, 0, 0)]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    let result = handle.poll_now().await;
    assert!(result.is_err());

    let recv = tokio::time::timeout(Duration::from_millis(100), event_rx.recv()).await;
    assert!(recv.is_err(), "failed tick must not publish an event");

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn consecutive_ticks_reflect_changing_snapshots() {
    let source = ScriptedSource::new([
        create_test_snapshot(1000, 500, 0),
        create_test_snapshot(1000, 200, 0),
    ]);
    let (event_tx, mut event_rx) = broadcast::channel(16);
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    handle.poll_now().await.unwrap();
    handle.poll_now().await.unwrap();

    let first = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_millis(500), event_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert!(second.iteration > first.iteration);
    assert_eq!(first.metrics.utilization, 50.0);
    assert_eq!(second.metrics.utilization, 80.0);
    assert_eq!(second.verdict.cause, Some(AlertCause::ModeratelyHigh));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn multiple_subscribers_see_the_same_event() {
    let source = ScriptedSource::new([create_test_snapshot(1000, 500, 100)]);
    let (event_tx, mut first_rx) = broadcast::channel(16);
    let mut second_rx = event_tx.subscribe();
    let handle = ProbeHandle::spawn(Box::new(source), &create_test_config(), event_tx);

    handle.poll_now().await.unwrap();

    let first = tokio::time::timeout(Duration::from_millis(500), first_rx.recv())
        .await
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_millis(500), second_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.metrics, second.metrics);
    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.iteration, second.iteration);

    handle.shutdown().await.unwrap();
}
