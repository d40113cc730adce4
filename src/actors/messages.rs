//! Message types for actor communication

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use crate::error::ProbeResult;
use crate::{AlertVerdict, MemorySnapshot, MetricSet};

/// Event published after each successful tick
///
/// Broadcast to all interested subscribers (exporter, tick logger). The
/// broadcast channel may lag or drop messages for slow subscribers — this is
/// acceptable as a fresh measurement replaces a stale one on the next tick.
#[derive(Debug, Clone)]
pub struct ProbeEvent {
    /// The raw snapshot the tick was derived from
    pub snapshot: MemorySnapshot,

    /// The normalized USE vector
    pub metrics: MetricSet,

    /// The classification of this tick
    pub verdict: AlertVerdict,

    /// When the snapshot was captured
    pub timestamp: DateTime<Utc>,

    /// 1-based tick counter
    pub iteration: u64,
}

/// Commands that can be sent to a ProbeActor
#[derive(Debug)]
pub enum ProbeCommand {
    /// Trigger an immediate tick (bypassing the interval timer)
    ///
    /// Used for testing and manual refresh operations.
    PollNow {
        /// Channel to send the result back
        respond_to: oneshot::Sender<ProbeResult<()>>,
    },

    /// Update the polling interval
    ///
    /// The new interval takes effect immediately.
    UpdateInterval {
        /// New interval in seconds
        interval_secs: u64,
    },

    /// Gracefully shut down the probe
    Shutdown,
}
