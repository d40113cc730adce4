//! Threshold classification of a normalized metric set

use crate::config::MemThresholds;
use crate::{AlertCause, AlertLevel, AlertVerdict, MetricSet};

/// Classify a metric set's utilization against the configured thresholds.
///
/// Ordered, first-match rule chain with short-circuit:
///
/// 1. below `low` → warn, cause `LowResource`
/// 2. above `engineered` → fatal, cause `ExcessiveResource`
/// 3. above `design` → warn, cause `ModeratelyHigh`
/// 4. otherwise → quiet verdict
///
/// The engineered check runs before the design check so a value above both
/// reports fatal, not warn. Pure function: same inputs, same verdict, no
/// hidden state, no panics — a misordered threshold set still classifies
/// deterministically in this order.
pub fn evaluate(metrics: &MetricSet, thresholds: &MemThresholds) -> AlertVerdict {
    let utilization = metrics.utilization;

    if utilization < thresholds.low {
        return AlertVerdict {
            message: "overall mem below low design point".to_string(),
            level: AlertLevel::Warn,
            triggered: true,
            cause: Some(AlertCause::LowResource),
        };
    }

    if utilization > thresholds.engineered {
        return AlertVerdict {
            message: "overall mem above engineered point".to_string(),
            level: AlertLevel::Fatal,
            triggered: true,
            cause: Some(AlertCause::ExcessiveResource),
        };
    }

    if utilization > thresholds.design {
        return AlertVerdict {
            message: "overall mem above design point".to_string(),
            level: AlertLevel::Warn,
            triggered: true,
            cause: Some(AlertCause::ModeratelyHigh),
        };
    }

    AlertVerdict::none()
}
