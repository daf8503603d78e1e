//! Health report types and status aggregation.

use deck_metrics::SystemSample;
use deck_probe::{ServiceHealth, ServiceStatus};
use serde::{Deserialize, Serialize};

/// Overall health of the application.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every probed service is up.
    Healthy,

    /// At least one probed service is degraded, none are down.
    Degraded,

    /// At least one probed service is down.
    Unhealthy,
}

/// Health report returned by the health endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HealthReport {
    /// Overall status of the application.
    pub status: HealthStatus,

    /// When the report was produced, as an RFC 3339 timestamp.
    pub timestamp: String,

    /// Application version.
    pub version: String,

    /// Deployment environment name.
    pub environment: String,

    /// Process uptime in seconds.
    pub uptime: f64,

    /// Per-service probe results, present in detailed reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServiceHealth>>,

    /// System readings, present in detailed reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemHealth>,

    /// Time spent producing the report, e.g. `12ms`.
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
}

/// System readings included in detailed health reports.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SystemHealth {
    /// Memory readings.
    pub memory: MemoryHealth,

    /// CPU readings.
    pub cpu: CpuHealth,

    /// Disk readings.
    pub disk: DiskHealth,
}

/// Memory readings in a health report.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct MemoryHealth {
    /// Memory used by this process, in bytes.
    pub used: u64,

    /// Total memory of the host, in bytes.
    pub total: u64,

    /// Used memory as a percentage of the total.
    pub percentage: f64,
}

/// CPU readings in a health report.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CpuHealth {
    /// Host-wide CPU usage percentage.
    pub usage: f64,
}

/// Disk readings in a health report.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct DiskHealth {
    /// Used disk space in bytes.
    pub used: u64,

    /// Total disk space in bytes.
    pub total: u64,

    /// Used disk space as a percentage of the total.
    pub percentage: f64,
}

impl From<SystemSample> for SystemHealth {
    fn from(sample: SystemSample) -> Self {
        Self {
            memory: MemoryHealth {
                used: sample.process_memory_bytes,
                total: sample.total_memory_bytes,
                percentage: percentage(sample.process_memory_bytes, sample.total_memory_bytes),
            },
            cpu: CpuHealth {
                usage: sample.cpu_usage_percent,
            },
            disk: DiskHealth {
                used: sample.disk_used_bytes,
                total: sample.disk_total_bytes,
                percentage: percentage(sample.disk_used_bytes, sample.disk_total_bytes),
            },
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(used: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64) * 100.0
    }
}

/// Aggregates service states into an overall status.
///
/// Any down service makes the application unhealthy. Otherwise any degraded
/// service makes it degraded. The order of `services` does not matter, and
/// an empty slice is healthy.
#[must_use]
pub fn overall_status(services: &[ServiceHealth]) -> HealthStatus {
    let any_down = services
        .iter()
        .any(|service| service.status == ServiceStatus::Down);
    let any_degraded = services
        .iter()
        .any(|service| service.status == ServiceStatus::Degraded);

    if any_down {
        HealthStatus::Unhealthy
    } else if any_degraded {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    }
}
