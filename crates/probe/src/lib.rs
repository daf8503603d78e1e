//! HTTP probing of downstream service health endpoints.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod types;

pub use types::{ProbeTarget, ServiceHealth, ServiceStatus, now_rfc3339};

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::debug;

/// Time allowed for a single probe before the target counts as down.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Probes downstream service health endpoints over HTTP.
///
/// Probing never fails as such. An unreachable or misbehaving target is
/// reported as [`ServiceStatus::Down`] with the failure in the `error`
/// field, so one slow service cannot poison a whole report.
#[derive(Clone, Debug)]
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    /// Creates a prober with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_PROBE_TIMEOUT)
    }

    /// Creates a prober allowing each probe `timeout` before it counts as down.
    ///
    /// # Panics
    ///
    /// Panics if `timeout` is zero.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "probe timeout must be positive");

        Self {
            client: Client::new(),
            timeout,
        }
    }

    /// Time allowed for a single probe.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probes a single target.
    ///
    /// A success status within the timeout yields [`ServiceStatus::Up`].
    /// Everything else (connection refused, DNS failure, timeout, or a
    /// non-success status) yields [`ServiceStatus::Down`] with the reason
    /// in the `error` field. No retries are made.
    pub async fn probe(&self, target: &ProbeTarget) -> ServiceHealth {
        let started = Instant::now();

        let result = self
            .client
            .get(&target.url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .send()
            .await;

        let response_time = Some(elapsed_millis(started));
        let last_check = now_rfc3339();

        match result {
            Ok(response) if response.status().is_success() => ServiceHealth {
                name: target.name.clone(),
                status: ServiceStatus::Up,
                response_time,
                last_check,
                error: None,
            },
            Ok(response) => {
                debug!("{} answered {}", target.name, response.status());

                ServiceHealth {
                    name: target.name.clone(),
                    status: ServiceStatus::Down,
                    response_time,
                    last_check,
                    error: Some(format!(
                        "{} HTTP {}",
                        target.label,
                        response.status().as_u16()
                    )),
                }
            }
            Err(error) => {
                debug!("{} probe failed: {error}", target.name);

                ServiceHealth {
                    name: target.name.clone(),
                    status: ServiceStatus::Down,
                    response_time,
                    last_check,
                    error: Some(format!("{}: {}", target.label, failure_reason(&error))),
                }
            }
        }
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn failure_reason(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        "Connection failed".to_string()
    } else {
        error.to_string()
    }
}
