//! Helper functions for integration tests

use std::collections::VecDeque;

use memprobe::MemorySnapshot;
use memprobe::collector::SnapshotSource;
use memprobe::config::Config;
use memprobe::error::{ProbeError, ProbeResult};

/// Source that plays back a fixed sequence of snapshots, then repeats the
/// last one.
pub struct ScriptedSource {
    script: VecDeque<MemorySnapshot>,
    last: Option<MemorySnapshot>,
}

impl ScriptedSource {
    pub fn new(snapshots: impl IntoIterator<Item = MemorySnapshot>) -> Self {
        Self {
            script: snapshots.into_iter().collect(),
            last: None,
        }
    }
}

impl SnapshotSource for ScriptedSource {
    fn capture(&mut self) -> ProbeResult<MemorySnapshot> {
        if let Some(next) = self.script.pop_front() {
            self.last = Some(next);
        }

        self.last.ok_or_else(|| {
            ProbeError::InvalidSnapshot("scripted source has no snapshots".to_string())
        })
    }
}

pub fn create_test_snapshot(total: u64, available: u64, swap_cached: u64) -> MemorySnapshot {
    MemorySnapshot {
        total,
        available,
        free: available,
        used: total.saturating_sub(available),
        buffers: 0,
        cached: 0,
        swap_cached,
    }
}

/// Default thresholds {low: 10, design: 70, engineered: 90}, one-second
/// interval, unbounded.
pub fn create_test_config() -> Config {
    Config::default()
}
