use tracing::trace;

use crate::error::{ProbeError, ProbeResult};

/// Top-level probe configuration
///
/// Loaded once at startup from a JSON file and never mutated afterwards.
/// The `alert.mem` block is required; everything else has defaults.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub alert: AlertConfig,

    /// Which saturation formula to apply (default: swap pressure)
    #[serde(default)]
    pub saturation: SaturationKind,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub exporter: ExporterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alert: AlertConfig {
                mem: MemThresholds {
                    low: 10.0,
                    design: 70.0,
                    engineered: 90.0,
                },
            },
            saturation: SaturationKind::default(),
            poll: PollConfig::default(),
            exporter: ExporterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AlertConfig {
    pub mem: MemThresholds,
}

/// Utilization boundaries, percentages over [0, 100]
///
/// Expected ordering is low < design < engineered; [`MemThresholds::validate`]
/// rejects anything else at load time so misconfiguration surfaces as a clear
/// startup error instead of confusing alert output later.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct MemThresholds {
    pub low: f64,
    pub design: f64,
    pub engineered: f64,
}

impl MemThresholds {
    pub fn validate(&self) -> ProbeResult<()> {
        if !(self.low.is_finite() && self.design.is_finite() && self.engineered.is_finite()) {
            return Err(ProbeError::ConfigParse(
                "thresholds must be finite numbers".to_string(),
            ));
        }

        if self.low < 0.0 || self.low >= self.design || self.design >= self.engineered {
            return Err(ProbeError::MisorderedThresholds {
                low: self.low,
                design: self.design,
                engineered: self.engineered,
            });
        }

        Ok(())
    }
}

/// Saturation strategy selection, see [`crate::probe::saturation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationKind {
    /// Swap-cached share of total memory (actual swap pressure)
    #[default]
    Swap,

    /// Utilization relative to the design threshold (ceiling proximity)
    DesignRatio,
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct PollConfig {
    /// Seconds between ticks
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Number of ticks before the probe stops; absent means run forever
    pub iterations: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            iterations: None,
        }
    }
}

#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct ExporterConfig {
    #[serde(default = "crate::util::get_port")]
    pub port: u16,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: crate::util::get_port(),
        }
    }
}

fn default_interval() -> u64 {
    1
}

pub fn read_config_file(path: &str) -> ProbeResult<Config> {
    let file_content = std::fs::read_to_string(path)?;
    parse_config(&file_content)
}

/// Parse and validate a JSON configuration document.
///
/// A missing or malformed `alert.mem` block is an error here, never a silent
/// fallback: a zero-valued "low" threshold would mask every low-memory
/// warning.
pub fn parse_config(input: &str) -> ProbeResult<Config> {
    let config: Config = serde_json::from_str(input)
        .map_err(|e| ProbeError::ConfigParse(format!("invalid configuration file: {e}")))?;

    config.alert.mem.validate()?;

    trace!("loaded config: {config:?}");
    Ok(config)
}
