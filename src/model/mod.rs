//! # Hexagram Model
//!
//! Plain data that crosses every boundary: engine ↔ driver ↔ renderer ↔ export.
//!
//! Design rule: pure data. No I/O, no logging, no math beyond bit access.

pub mod code;
pub mod metrics;

pub use code::{Code, LINES};
pub use metrics::{Metric, MetricSeries, TransitionDistances, TransitionMetrics};
