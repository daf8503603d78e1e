//! Prometheus text exposition rendering.

use crate::MetricsSnapshot;

/// Value of the `app` label attached to every exported series.
pub const APP_LABEL: &str = "saas-control-deck-frontend";

/// Prometheus metric kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricKind {
    /// Monotonically increasing value.
    Counter,

    /// Value that can go up and down.
    Gauge,
}

impl MetricKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Gauge => "gauge",
        }
    }
}

/// One metric in the text exposition.
#[derive(Clone, Debug)]
pub struct PrometheusMetric {
    /// Series name, e.g. `http_requests_total`.
    pub name: String,

    /// Help text shown in the `# HELP` line.
    pub help: String,

    /// Metric kind shown in the `# TYPE` line.
    pub kind: MetricKind,

    /// Current value.
    pub value: f64,

    /// Label pairs rendered in declaration order.
    pub labels: Vec<(String, String)>,
}

impl PrometheusMetric {
    fn render(&self) -> String {
        let labels = if self.labels.is_empty() {
            String::new()
        } else {
            let pairs: Vec<String> = self
                .labels
                .iter()
                .map(|(key, value)| format!("{key}=\"{value}\""))
                .collect();

            format!("{{{}}}", pairs.join(","))
        };

        format!(
            "# HELP {name} {help}\n# TYPE {name} {kind}\n{name}{labels} {value}",
            name = self.name,
            help = self.help,
            kind = self.kind.as_str(),
            labels = labels,
            value = self.value,
        )
    }
}

/// Renders metrics as Prometheus text blocks separated by blank lines.
#[must_use]
pub fn render(metrics: &[PrometheusMetric]) -> String {
    let blocks: Vec<String> = metrics.iter().map(PrometheusMetric::render).collect();
    blocks.join("\n\n")
}

/// Renders the standard exposition for a metrics snapshot.
///
/// Every series carries an `app` label with [`APP_LABEL`] as its value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn exposition(snapshot: &MetricsSnapshot) -> String {
    let app_labels = || vec![("app".to_string(), APP_LABEL.to_string())];

    render(&[
        PrometheusMetric {
            name: "http_requests_total".to_string(),
            help: "Total number of HTTP requests".to_string(),
            kind: MetricKind::Counter,
            value: snapshot.requests_total as f64,
            labels: app_labels(),
        },
        PrometheusMetric {
            name: "http_request_duration_seconds".to_string(),
            help: "HTTP request duration in seconds".to_string(),
            kind: MetricKind::Gauge,
            value: snapshot.request_duration_seconds,
            labels: app_labels(),
        },
        PrometheusMetric {
            name: "http_active_connections".to_string(),
            help: "Number of active HTTP connections".to_string(),
            kind: MetricKind::Gauge,
            value: snapshot.active_connections as f64,
            labels: app_labels(),
        },
        PrometheusMetric {
            name: "http_errors_total".to_string(),
            help: "Total number of HTTP errors".to_string(),
            kind: MetricKind::Counter,
            value: snapshot.errors_total as f64,
            labels: app_labels(),
        },
        PrometheusMetric {
            name: "process_memory_usage_bytes".to_string(),
            help: "Process memory usage in bytes".to_string(),
            kind: MetricKind::Gauge,
            value: snapshot.memory_usage_bytes as f64,
            labels: app_labels(),
        },
        PrometheusMetric {
            name: "process_uptime_seconds".to_string(),
            help: "Process uptime in seconds".to_string(),
            kind: MetricKind::Gauge,
            value: snapshot.uptime_seconds,
            labels: app_labels(),
        },
    ])
}
