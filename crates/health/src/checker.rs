//! Detailed health checking with downstream probes.

use std::sync::Arc;

use deck_config::DeckConfig;
use deck_metrics::SystemMonitor;
use deck_probe::{ProbeTarget, Prober, ServiceHealth, ServiceStatus, now_rfc3339};
use futures::future::join_all;
use tracing::debug;

use crate::report::{HealthReport, HealthStatus, SystemHealth, overall_status};

/// Options for creating a `HealthChecker`.
pub struct HealthCheckerOptions {
    /// Deployment configuration.
    pub config: Arc<DeckConfig>,

    /// Shared monitor for uptime and system readings.
    pub monitor: Arc<SystemMonitor>,

    /// Prober used for downstream checks.
    pub prober: Prober,

    /// Downstream services to probe in detailed reports.
    pub targets: Vec<ProbeTarget>,
}

/// Produces health reports for the health endpoint.
pub struct HealthChecker {
    config: Arc<DeckConfig>,
    monitor: Arc<SystemMonitor>,
    prober: Prober,
    targets: Vec<ProbeTarget>,
}

impl HealthChecker {
    /// Creates a new `HealthChecker`.
    #[must_use]
    pub fn new(
        HealthCheckerOptions {
            config,
            monitor,
            prober,
            targets,
        }: HealthCheckerOptions,
    ) -> Self {
        Self {
            config,
            monitor,
            prober,
            targets,
        }
    }

    /// Produces a health report.
    ///
    /// The base report carries only process facts and is always healthy. A
    /// detailed report additionally probes every configured target
    /// concurrently and aggregates their states into the overall status.
    pub async fn check(&self, detailed: bool) -> HealthReport {
        let mut report = HealthReport {
            status: HealthStatus::Healthy,
            timestamp: now_rfc3339(),
            version: deck_config::VERSION.to_string(),
            environment: self.config.environment_name().to_string(),
            uptime: self.monitor.uptime_seconds(),
            services: None,
            system: None,
            response_time: None,
        };

        if detailed {
            let services = self.probe_services().await;
            debug!("probed {} services", services.len());

            report.status = overall_status(&services);
            report.services = Some(services);
            report.system = Some(SystemHealth::from(self.monitor.sample()));
        }

        report
    }

    async fn probe_services(&self) -> Vec<ServiceHealth> {
        let probes = self.targets.iter().map(|target| self.prober.probe(target));
        let mut services = join_all(probes).await;

        // The hosted AI integration has no probe endpoint. Report it as up
        // whenever an API key is configured.
        if self.config.genai_api_key.is_some() {
            services.push(ServiceHealth {
                name: "google-ai".to_string(),
                status: ServiceStatus::Up,
                response_time: None,
                last_check: now_rfc3339(),
                error: None,
            });
        }

        services
    }
}

/// Default backend probe targets, addressed via `probe_host`.
///
/// Covers both backend clusters: ports 8000-8002 for the pro1 cluster and
/// 8100-8102 for the pro2 cluster.
#[must_use]
pub fn default_targets(probe_host: &str) -> Vec<ProbeTarget> {
    [
        ("backend-pro1-api", 8000, "API Gateway"),
        ("backend-pro1-data", 8001, "Data Service"),
        ("backend-pro1-ai", 8002, "AI Service"),
        ("backend-pro2-api", 8100, "API Gateway"),
        ("backend-pro2-data", 8101, "Data Service"),
        ("backend-pro2-ai", 8102, "AI Service"),
    ]
    .into_iter()
    .map(|(name, port, label)| {
        ProbeTarget::new(name, format!("http://{probe_host}:{port}/health"), label)
    })
    .collect()
}
