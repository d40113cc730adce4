//! Pluggable saturation policies
//!
//! Two formulas for the saturation axis exist in the wild: swap-cached share
//! of total memory (actual swap pressure) and utilization relative to the
//! design threshold (proximity to a configured ceiling). They measure
//! different things, so both ship as named strategies and configuration
//! selects one — they are never mixed.

use crate::config::{MemThresholds, SaturationKind};
use crate::error::{ProbeError, ProbeResult};
use crate::{MemorySnapshot, MetricSet};

/// Single-method capability computing the saturation value for one tick.
pub trait SaturationStrategy: Send + Sync {
    fn compute(
        &self,
        snapshot: &MemorySnapshot,
        metrics: &MetricSet,
        thresholds: &MemThresholds,
    ) -> ProbeResult<f64>;

    /// Name used in configuration and logs.
    fn name(&self) -> &'static str;
}

/// Saturation as actual swap pressure: swap-cached share of total memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapPressure;

impl SaturationStrategy for SwapPressure {
    fn compute(
        &self,
        snapshot: &MemorySnapshot,
        _metrics: &MetricSet,
        _thresholds: &MemThresholds,
    ) -> ProbeResult<f64> {
        if snapshot.total == 0 {
            return Err(ProbeError::InvalidSnapshot(
                "total memory is zero, swap pressure is undefined".to_string(),
            ));
        }

        Ok(100.0 * snapshot.swap_cached as f64 / snapshot.total as f64)
    }

    fn name(&self) -> &'static str {
        "swap"
    }
}

/// Saturation as proximity to the configured design ceiling.
///
/// Unlike swap pressure this can exceed 100 when utilization passes the
/// design threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignRatio;

impl SaturationStrategy for DesignRatio {
    fn compute(
        &self,
        _snapshot: &MemorySnapshot,
        metrics: &MetricSet,
        thresholds: &MemThresholds,
    ) -> ProbeResult<f64> {
        if thresholds.design <= 0.0 {
            return Err(ProbeError::InvalidThresholds(format!(
                "design threshold must be positive for the design-ratio strategy, got {}",
                thresholds.design
            )));
        }

        Ok(100.0 * metrics.utilization / thresholds.design)
    }

    fn name(&self) -> &'static str {
        "design-ratio"
    }
}

impl SaturationKind {
    pub fn strategy(self) -> Box<dyn SaturationStrategy> {
        match self {
            SaturationKind::Swap => Box::new(SwapPressure),
            SaturationKind::DesignRatio => Box::new(DesignRatio),
        }
    }
}
