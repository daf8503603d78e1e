//! Process-lifetime metrics store with Prometheus text exposition.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod prometheus;
mod store;
mod system;

pub use prometheus::{APP_LABEL, MetricKind, PrometheusMetric, exposition, render};
pub use store::{MetricsSnapshot, MetricsStore};
pub use system::{SystemMonitor, SystemSample};
