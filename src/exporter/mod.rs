//! Prometheus export of probe measurements
//!
//! The exporter runs independently of the polling sequence: it serves the
//! most recently published gauge values on demand and never feeds back into
//! the probe.
//!
//! ## Endpoints
//!
//! - `GET /metrics` - Prometheus text exposition of the USE gauges
//! - `GET /health` - Health check

pub mod gauges;
pub mod server;

pub use gauges::UseGauges;
pub use server::{router, spawn_exporter, update_loop};
