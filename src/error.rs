//! Error types for the probe pipeline

use std::fmt;

/// Result type alias for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;

/// Errors that can occur while normalizing or configuring the probe
#[derive(Debug)]
pub enum ProbeError {
    /// The snapshot cannot be normalized (zero total memory)
    InvalidSnapshot(String),

    /// Threshold configuration is missing or malformed
    ConfigParse(String),

    /// Threshold ordering violates low < design < engineered
    MisorderedThresholds {
        low: f64,
        design: f64,
        engineered: f64,
    },

    /// A saturation strategy cannot run with the given thresholds
    InvalidThresholds(String),

    /// I/O error (config file access, procfs reads)
    Io(std::io::Error),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::InvalidSnapshot(msg) => write!(f, "invalid memory snapshot: {}", msg),
            ProbeError::ConfigParse(msg) => write!(f, "failed to parse configuration: {}", msg),
            ProbeError::MisorderedThresholds {
                low,
                design,
                engineered,
            } => write!(
                f,
                "thresholds must satisfy low < design < engineered, got low={low}, design={design}, engineered={engineered}"
            ),
            ProbeError::InvalidThresholds(msg) => write!(f, "invalid thresholds: {}", msg),
            ProbeError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::Io(err)
    }
}
