//! Actor-based probe loop
//!
//! The probe runs as an independent async task communicating via Tokio
//! channels.
//!
//! ```text
//!              ┌────────────────┐
//!   commands ─▶│   ProbeActor   │
//!   (mpsc)     │ tick: capture →│
//!              │ normalize →    │
//!              │ evaluate       │
//!              └───────┬────────┘
//!                      │ ProbeEvent (broadcast)
//!          ┌───────────┴───────────┐
//!          ▼                       ▼
//!     exporter gauges         tick logger
//! ```
//!
//! ## Communication Patterns
//!
//! 1. **Commands**: an mpsc channel carries control messages to the actor
//! 2. **Events**: each successful tick is published to a broadcast channel
//! 3. **Request/Response**: oneshot channels answer synchronous commands

pub mod messages;
pub mod probe;
