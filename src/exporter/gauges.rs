//! Gauge registry for the USE vector and raw usage details

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::actors::messages::ProbeEvent;

/// The two gauge families exported for scraping:
///
/// - `memprobe_mem_metrics{use=...}` — the USE indicator values
/// - `memprobe_mem_usage{mem=...}` — raw usage details, in KiB
#[derive(Clone)]
pub struct UseGauges {
    registry: Registry,
    indicator: GaugeVec,
    usage: GaugeVec,
}

impl UseGauges {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let indicator = GaugeVec::new(
            Opts::new(
                "memprobe_mem_metrics",
                "MEM Load Utilization Saturation Errors Throughput Latency",
            ),
            &["use"],
        )?;
        let usage = GaugeVec::new(Opts::new("memprobe_mem_usage", "MEM usage details"), &["mem"])?;

        registry.register(Box::new(indicator.clone()))?;
        registry.register(Box::new(usage.clone()))?;

        Ok(Self {
            registry,
            indicator,
            usage,
        })
    }

    /// Publish one tick's measurements to the gauges.
    pub fn update(&self, event: &ProbeEvent) {
        let metrics = &event.metrics;
        self.indicator
            .with_label_values(&["utilization"])
            .set(metrics.utilization);
        self.indicator
            .with_label_values(&["saturation"])
            .set(metrics.saturation);
        self.indicator
            .with_label_values(&["throughput"])
            .set(metrics.throughput);
        self.indicator
            .with_label_values(&["errors"])
            .set(metrics.errors);

        // raw usage is exported in KiB
        let snapshot = &event.snapshot;
        self.usage
            .with_label_values(&["memtotal"])
            .set(snapshot.total as f64 / 1024.0);
        self.usage
            .with_label_values(&["available"])
            .set(snapshot.available as f64 / 1024.0);
        self.usage
            .with_label_values(&["free"])
            .set(snapshot.free as f64 / 1024.0);
        self.usage
            .with_label_values(&["used"])
            .set(snapshot.used as f64 / 1024.0);
        self.usage
            .with_label_values(&["buffers"])
            .set(snapshot.buffers as f64 / 1024.0);
        self.usage
            .with_label_values(&["cached"])
            .set(snapshot.cached as f64 / 1024.0);
    }

    /// Render the registry in the Prometheus text exposition format.
    pub fn encode(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
