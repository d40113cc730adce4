//! The normalization-and-evaluation pipeline
//!
//! One tick flows through this module exactly once:
//!
//! ```text
//! MemorySnapshot → normalize() → MetricSet → evaluate() → AlertVerdict
//! ```
//!
//! Both functions are pure: they take their inputs as arguments and return
//! fresh results. No state survives a tick.

pub mod evaluate;
pub mod normalize;
pub mod saturation;

pub use evaluate::evaluate;
pub use normalize::normalize;
pub use saturation::{DesignRatio, SaturationStrategy, SwapPressure};
