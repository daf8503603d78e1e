//! Wire types describing the observed state of downstream services.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Observed state of a single downstream service.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// The service answered with a success status within the timeout.
    Up,

    /// The service was unreachable, timed out, or answered with an error.
    Down,

    /// The service answered but reported reduced capacity.
    Degraded,
}

/// Result of probing a single downstream service.
///
/// Probe failures are carried in the `error` field rather than surfaced as
/// errors, so a fleet of probes always yields one entry per target.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// Service identifier, e.g. `backend-pro1-api`.
    pub name: String,

    /// Observed state of the service.
    pub status: ServiceStatus,

    /// Round-trip time of the probe in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,

    /// When the probe completed, as an RFC 3339 timestamp.
    pub last_check: String,

    /// Failure detail when the service is not up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A downstream service health endpoint to probe.
#[derive(Clone, Debug)]
pub struct ProbeTarget {
    /// Service identifier used in reports, e.g. `backend-pro1-api`.
    pub name: String,

    /// Full URL of the health endpoint, e.g. `http://localhost:8000/health`.
    pub url: String,

    /// Human-readable label used in failure messages, e.g. `API Gateway`.
    pub label: String,
}

impl ProbeTarget {
    /// Creates a new probe target.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            label: label.into(),
        }
    }
}

/// Returns the current time as an RFC 3339 timestamp with millisecond
/// precision, e.g. `2025-01-05T12:30:45.123Z`.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Up).unwrap(),
            "\"up\""
        );
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Down).unwrap(),
            "\"down\""
        );
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_service_health_uses_camel_case_and_omits_empty_fields() {
        let health = ServiceHealth {
            name: "backend-pro1-api".to_string(),
            status: ServiceStatus::Up,
            response_time: Some(12),
            last_check: "2025-01-05T12:30:45.123Z".to_string(),
            error: None,
        };

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["responseTime"], 12);
        assert_eq!(json["lastCheck"], "2025-01-05T12:30:45.123Z");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_now_rfc3339_has_millisecond_precision() {
        let timestamp = now_rfc3339();
        assert!(timestamp.ends_with('Z'));

        // e.g. 2025-01-05T12:30:45.123Z
        let fraction = timestamp
            .split('.')
            .nth(1)
            .expect("timestamp should have a fractional part");
        assert_eq!(fraction.len(), "123Z".len());
    }
}
