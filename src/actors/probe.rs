//! ProbeActor - drives the sample → normalize → evaluate sequence
//!
//! ## Message Flow
//!
//! ```text
//! Timer tick → capture snapshot → normalize → evaluate → publish ProbeEvent → [exporter, logger, ...]
//!     ↑
//!     └─── Commands (PollNow, UpdateInterval, Shutdown)
//! ```
//!
//! Each tick is one synchronous sequence with no suspension points; the
//! actor's channels are the only concurrency around it. A failed tick
//! publishes nothing — the error is logged and the next tick proceeds.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::interval;
use tracing::{debug, error, instrument, trace, warn};

use crate::collector::SnapshotSource;
use crate::config::{Config, MemThresholds};
use crate::error::ProbeResult;
use crate::probe::saturation::SaturationStrategy;
use crate::probe::{evaluate, normalize};

use super::messages::{ProbeCommand, ProbeEvent};

/// Actor that periodically probes host memory health
pub struct ProbeActor {
    /// Where snapshots come from
    source: Box<dyn SnapshotSource>,

    /// Read-only thresholds, shared with nobody — each actor owns its copy
    thresholds: MemThresholds,

    /// Saturation policy selected at startup
    strategy: Box<dyn SaturationStrategy>,

    /// Command receiver for control messages
    command_rx: mpsc::Receiver<ProbeCommand>,

    /// Broadcast sender for publishing tick results
    event_tx: broadcast::Sender<ProbeEvent>,

    /// Current polling interval
    interval_duration: Duration,

    /// Tick budget for a bounded run (None = run forever)
    iterations: Option<u64>,

    /// Ticks executed so far, failed ones included
    ticks: u64,
}

impl ProbeActor {
    pub fn new(
        source: Box<dyn SnapshotSource>,
        config: &Config,
        command_rx: mpsc::Receiver<ProbeCommand>,
        event_tx: broadcast::Sender<ProbeEvent>,
    ) -> Self {
        Self {
            source,
            thresholds: config.alert.mem,
            strategy: config.saturation.strategy(),
            command_rx,
            event_tx,
            interval_duration: Duration::from_secs(config.poll.interval),
            iterations: config.poll.iterations,
            ticks: 0,
        }
    }

    /// Run the actor's main loop
    ///
    /// This is the entry point for the actor. It runs until:
    /// - A Shutdown command is received
    /// - The command channel is closed
    /// - A bounded run exhausts its tick budget
    #[instrument(skip(self), fields(strategy = self.strategy.name()))]
    pub async fn run(mut self) {
        debug!("starting probe actor");

        let mut ticker = interval(self.interval_duration);

        loop {
            tokio::select! {
                // Timer tick - probe memory
                _ = ticker.tick() => {
                    if let Err(e) = self.tick() {
                        error!("tick failed: {e}");
                    }

                    if let Some(limit) = self.iterations
                        && self.ticks >= limit
                    {
                        debug!("completed {limit} iterations");
                        break;
                    }
                }

                // Handle commands
                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        ProbeCommand::PollNow { respond_to } => {
                            debug!("received PollNow command");
                            let result = self.tick();
                            let _ = respond_to.send(result);
                        }

                        ProbeCommand::UpdateInterval { interval_secs } => {
                            debug!("updating interval to {interval_secs}s");
                            self.interval_duration = Duration::from_secs(interval_secs);
                            ticker = interval(self.interval_duration);
                        }

                        ProbeCommand::Shutdown => {
                            debug!("received shutdown command");
                            break;
                        }
                    }
                }

                // Command channel closed - exit
                else => {
                    warn!("command channel closed, shutting down");
                    break;
                }
            }
        }

        debug!("probe actor stopped");
    }

    /// Execute one tick: capture → normalize → evaluate → publish.
    ///
    /// Errors are returned to the caller; a failed tick publishes no event
    /// but still counts toward a bounded run.
    fn tick(&mut self) -> ProbeResult<()> {
        self.ticks += 1;

        let snapshot = self.source.capture()?;
        let metrics = normalize(&snapshot, self.strategy.as_ref(), &self.thresholds)?;
        let verdict = evaluate(&metrics, &self.thresholds);

        trace!(
            utilization = metrics.utilization,
            saturation = metrics.saturation,
            level = verdict.level.as_str(),
            "tick evaluated"
        );

        let event = ProbeEvent {
            snapshot,
            metrics,
            verdict,
            timestamp: Utc::now(),
            iteration: self.ticks,
        };

        // Send errors just mean there are no subscribers right now.
        match self.event_tx.send(event) {
            Ok(num_receivers) => {
                trace!("published probe event to {num_receivers} receivers");
            }
            Err(_) => {
                trace!("no receivers for probe event (this is OK)");
            }
        }

        Ok(())
    }
}

/// Handle for controlling a ProbeActor
///
/// This handle provides a typed API for sending commands to the actor.
/// It can be cloned and shared across threads.
#[derive(Clone)]
pub struct ProbeHandle {
    sender: mpsc::Sender<ProbeCommand>,
}

impl ProbeHandle {
    /// Spawn a new probe actor
    ///
    /// This creates the actor, spawns it as a tokio task, and returns a handle.
    pub fn spawn(
        source: Box<dyn SnapshotSource>,
        config: &Config,
        event_tx: broadcast::Sender<ProbeEvent>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let actor = ProbeActor::new(source, config, cmd_rx, event_tx);
        tokio::spawn(actor.run());

        Self { sender: cmd_tx }
    }

    /// Trigger an immediate tick
    ///
    /// This bypasses the interval timer and probes immediately.
    /// Useful for testing and manual refresh operations.
    pub async fn poll_now(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ProbeCommand::PollNow { respond_to: tx })
            .await
            .context("failed to send PollNow command")?;

        rx.await.context("failed to receive response")??;
        Ok(())
    }

    /// Update the polling interval
    pub async fn update_interval(&self, interval_secs: u64) -> Result<()> {
        self.sender
            .send(ProbeCommand::UpdateInterval { interval_secs })
            .await
            .context("failed to send UpdateInterval command")?;
        Ok(())
    }

    /// Gracefully shut down the probe
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(ProbeCommand::Shutdown)
            .await
            .context("failed to send Shutdown command")?;
        Ok(())
    }
}
