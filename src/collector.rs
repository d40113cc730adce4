//! Host memory snapshot capture

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::MemorySnapshot;
use crate::error::ProbeResult;

/// Source of point-in-time memory statistics.
///
/// The probe actor owns a boxed source; tests substitute scripted ones.
pub trait SnapshotSource: Send {
    fn capture(&mut self) -> ProbeResult<MemorySnapshot>;
}

/// Production source backed by sysinfo.
///
/// sysinfo covers total/available/free/used; buffers, cached and swap-cached
/// come from `/proc/meminfo` on Linux and read as zero elsewhere.
pub struct SystemSource {
    system: System,
}

impl SystemSource {
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
            ),
        }
    }
}

impl Default for SystemSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotSource for SystemSource {
    fn capture(&mut self) -> ProbeResult<MemorySnapshot> {
        self.system.refresh_memory();
        let page_cache = PageCacheStats::read();

        Ok(MemorySnapshot {
            total: self.system.total_memory(),
            available: self.system.available_memory(),
            free: self.system.free_memory(),
            used: self.system.used_memory(),
            buffers: page_cache.buffers,
            cached: page_cache.cached,
            swap_cached: page_cache.swap_cached,
        })
    }
}

/// Page-cache counters sysinfo does not expose, in bytes.
#[derive(Debug, Clone, Copy, Default)]
struct PageCacheStats {
    buffers: u64,
    cached: u64,
    swap_cached: u64,
}

impl PageCacheStats {
    #[cfg(target_os = "linux")]
    fn read() -> Self {
        let Ok(meminfo) = std::fs::read_to_string("/proc/meminfo") else {
            return Self::default();
        };
        Self::parse(&meminfo)
    }

    #[cfg(not(target_os = "linux"))]
    fn read() -> Self {
        Self::default()
    }

    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    fn parse(meminfo: &str) -> Self {
        let mut stats = Self::default();

        for line in meminfo.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let Some(value) = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok())
            else {
                continue;
            };

            // /proc/meminfo reports kibibytes
            match key {
                "Buffers" => stats.buffers = value * 1024,
                "Cached" => stats.cached = value * 1024,
                "SwapCached" => stats.swap_cached = value * 1024,
                _ => {}
            }
        }

        stats
    }
}
