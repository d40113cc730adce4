pub mod actors;
pub mod collector;
pub mod config;
pub mod error;
#[cfg(feature = "export")]
pub mod exporter;
pub mod probe;
pub mod util;

use serde::{Deserialize, Serialize};

/// Point-in-time memory statistics, all fields in bytes.
///
/// Captured once per tick and consumed by a single normalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub total: u64,
    pub available: u64,
    pub free: u64,
    pub used: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_cached: u64,
}

/// Normalized USE vector derived from one snapshot.
///
/// Serializes with the fixed keys `mem`, `use`, `latency`, `throughput`,
/// `throughputmax`, `saturation` and `errors`. Both `mem` and `use` carry
/// utilization; throughput, latency and errors are zero placeholders kept so
/// the shape lines up with resource types that do have those axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Percentage of memory not available, in [0, 100].
    #[serde(rename = "mem")]
    pub utilization: f64,

    /// Overall USE indicator, mirrors `utilization`.
    #[serde(rename = "use")]
    pub indicator: f64,

    pub latency: f64,
    pub throughput: f64,
    pub throughputmax: f64,

    /// Memory pressure per the configured saturation strategy.
    pub saturation: f64,

    pub errors: f64,
}

/// Severity of an alert verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    #[serde(rename = "")]
    None,
    Warn,
    Fatal,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::None => "",
            AlertLevel::Warn => "warn",
            AlertLevel::Fatal => "fatal",
        }
    }
}

/// Machine-readable reason behind a triggered verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCause {
    LowResource,
    ModeratelyHigh,
    ExcessiveResource,
}

/// Outcome of evaluating one metric set against the thresholds.
///
/// Created fresh each tick and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertVerdict {
    pub message: String,
    pub level: AlertLevel,
    pub triggered: bool,
    pub cause: Option<AlertCause>,
}

impl AlertVerdict {
    /// The quiet verdict: nothing to report.
    pub fn none() -> Self {
        Self {
            message: String::new(),
            level: AlertLevel::None,
            triggered: false,
            cause: None,
        }
    }
}
