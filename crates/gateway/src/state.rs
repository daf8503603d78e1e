//! Shared state handed to the gateway handlers.

use std::sync::Arc;

use deck_config::DeckConfig;
use deck_health::{HealthChecker, ReadinessChecker};
use deck_metrics::{MetricsStore, SystemMonitor};

/// State shared by every handler.
///
/// Everything is behind an `Arc`, so cloning per request is cheap.
#[derive(Clone)]
pub(crate) struct GatewayState {
    /// Deployment configuration.
    pub config: Arc<DeckConfig>,

    /// Health checker behind the health endpoint.
    pub health: Arc<HealthChecker>,

    /// Readiness checker behind the readiness endpoint.
    pub readiness: Arc<ReadinessChecker>,

    /// Process-lifetime metrics store.
    pub metrics: Arc<MetricsStore>,

    /// Monitor backing the process gauges.
    pub monitor: Arc<SystemMonitor>,
}
