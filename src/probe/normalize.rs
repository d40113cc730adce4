//! Snapshot normalization into the USE vector

use crate::config::MemThresholds;
use crate::error::{ProbeError, ProbeResult};
use crate::probe::saturation::SaturationStrategy;
use crate::{MemorySnapshot, MetricSet};

/// Normalize a raw memory snapshot into the fixed-shape USE vector.
///
/// Utilization is the percentage of memory not available:
/// `100 × (total − available) / total`. A snapshot with zero total memory is
/// rejected with [`ProbeError::InvalidSnapshot`] — callers must treat that as
/// a failed tick, never as a metric value.
///
/// Saturation comes from the injected strategy; errors, throughput and
/// latency stay zero so the output shape matches resource types that do have
/// those axes.
pub fn normalize(
    snapshot: &MemorySnapshot,
    strategy: &dyn SaturationStrategy,
    thresholds: &MemThresholds,
) -> ProbeResult<MetricSet> {
    if snapshot.total == 0 {
        return Err(ProbeError::InvalidSnapshot(
            "total memory is zero, utilization is undefined".to_string(),
        ));
    }

    let total = snapshot.total as f64;
    // clamp so a snapshot reporting available > total stays within [0, 100]
    let available = snapshot.available.min(snapshot.total) as f64;
    let utilization = 100.0 * (total - available) / total;

    let mut metrics = MetricSet {
        utilization,
        indicator: utilization,
        latency: 0.0,
        throughput: 0.0,
        throughputmax: 0.0,
        saturation: 0.0,
        errors: 0.0,
    };
    metrics.saturation = strategy.compute(snapshot, &metrics, thresholds)?;

    Ok(metrics)
}
