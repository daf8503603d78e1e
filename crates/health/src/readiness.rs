//! Readiness checking used to gate traffic.

use std::sync::Arc;
use std::time::Instant;

use deck_config::DeckConfig;
use deck_probe::{ProbeTarget, Prober, ServiceStatus, now_rfc3339};
use serde::{Deserialize, Serialize};

/// Outcome of a single readiness check.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The check passed.
    Pass,

    /// The check failed.
    Fail,
}

/// Result of a single readiness check.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheck {
    /// Check identifier, e.g. `backend-api`.
    pub name: String,

    /// Whether the check passed.
    pub status: CheckStatus,

    /// Time the check took in milliseconds, for checks that do I/O.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,

    /// Failure detail, or an advisory note on a passing check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Whether a failure of this check blocks readiness.
    pub required: bool,
}

/// Readiness report returned by the readiness endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReadinessReport {
    /// Whether the application is ready to receive traffic.
    pub ready: bool,

    /// When the report was produced, as an RFC 3339 timestamp.
    pub timestamp: String,

    /// Individual check results.
    pub checks: Vec<ReadinessCheck>,

    /// Application version.
    pub version: String,

    /// Deployment environment name.
    pub environment: String,

    /// Time spent producing the report, e.g. `12ms`.
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
}

/// Whether the checks allow traffic.
///
/// Only failures of required checks block readiness. Optional checks may
/// fail without consequence, and passing checks may still carry notes in
/// their `error` field.
#[must_use]
pub fn is_ready(checks: &[ReadinessCheck]) -> bool {
    !checks
        .iter()
        .any(|check| check.required && check.status == CheckStatus::Fail)
}

/// Options for creating a `ReadinessChecker`.
pub struct ReadinessCheckerOptions {
    /// Deployment configuration.
    pub config: Arc<DeckConfig>,

    /// Prober used for the backend connectivity check.
    pub prober: Prober,
}

/// Produces readiness reports for the readiness endpoint.
pub struct ReadinessChecker {
    config: Arc<DeckConfig>,
    prober: Prober,
}

impl ReadinessChecker {
    /// Creates a new `ReadinessChecker`.
    #[must_use]
    pub fn new(ReadinessCheckerOptions { config, prober }: ReadinessCheckerOptions) -> Self {
        Self { config, prober }
    }

    /// Runs every readiness check and assembles the report.
    pub async fn check(&self) -> ReadinessReport {
        let checks = vec![
            self.check_backend_api().await,
            self.check_environment(),
            self.check_ai_configuration(),
        ];

        ReadinessReport {
            ready: is_ready(&checks),
            timestamp: now_rfc3339(),
            checks,
            version: deck_config::VERSION.to_string(),
            environment: self.config.environment_name().to_string(),
            response_time: None,
        }
    }

    /// Probes the readiness endpoint of the configured backend API.
    ///
    /// A missing base URL is itself a required failure, reported under the
    /// `backend-api-config` name so operators can tell configuration gaps
    /// from connectivity problems.
    async fn check_backend_api(&self) -> ReadinessCheck {
        let started = Instant::now();

        let Some(base_url) = self.config.api_base_url.as_deref() else {
            return ReadinessCheck {
                name: "backend-api-config".to_string(),
                status: CheckStatus::Fail,
                response_time: Some(elapsed_millis(started)),
                error: Some(format!(
                    "{} is not configured",
                    deck_config::API_BASE_URL_VAR
                )),
                required: true,
            };
        };

        let target = ProbeTarget::new("backend-api", format!("{base_url}/ready"), "Backend API");
        let health = self.prober.probe(&target).await;

        ReadinessCheck {
            name: "backend-api".to_string(),
            status: if health.status == ServiceStatus::Up {
                CheckStatus::Pass
            } else {
                CheckStatus::Fail
            },
            response_time: health.response_time,
            error: health.error,
            required: true,
        }
    }

    /// Verifies the deployment variables, warning on missing optional ones.
    fn check_environment(&self) -> ReadinessCheck {
        let required = [
            (deck_config::API_BASE_URL_VAR, &self.config.api_base_url),
            (deck_config::NODE_ENV_VAR, &self.config.node_env),
        ];
        let optional = [
            (deck_config::GENKIT_ENV_VAR, &self.config.genkit_env),
            (deck_config::GENAI_API_KEY_VAR, &self.config.genai_api_key),
        ];

        let missing_required: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        if !missing_required.is_empty() {
            return ReadinessCheck {
                name: "environment-variables".to_string(),
                status: CheckStatus::Fail,
                response_time: None,
                error: Some(format!(
                    "Missing required environment variables: {}",
                    missing_required.join(", ")
                )),
                required: true,
            };
        }

        let missing_optional: Vec<&str> = optional
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();

        let warning = if missing_optional.is_empty() {
            None
        } else {
            Some(format!(
                "Optional environment variables not set: {}",
                missing_optional.join(", ")
            ))
        };

        ReadinessCheck {
            name: "environment-variables".to_string(),
            status: CheckStatus::Pass,
            response_time: None,
            error: warning,
            required: true,
        }
    }

    /// Verifies the AI integration configuration.
    ///
    /// Production requires an API key. Elsewhere the integration is
    /// optional and a missing configuration only earns an advisory note.
    fn check_ai_configuration(&self) -> ReadinessCheck {
        let has_key = self.config.genai_api_key.is_some();

        if self.config.is_production() && !has_key {
            return ReadinessCheck {
                name: "ai-configuration".to_string(),
                status: CheckStatus::Fail,
                response_time: None,
                error: Some(format!(
                    "{} is required in production",
                    deck_config::GENAI_API_KEY_VAR
                )),
                required: true,
            };
        }

        if !has_key && self.config.genkit_env.is_none() {
            return ReadinessCheck {
                name: "ai-configuration".to_string(),
                status: CheckStatus::Pass,
                response_time: None,
                error: Some(
                    "AI configuration missing; some features may be unavailable".to_string(),
                ),
                required: false,
            };
        }

        ReadinessCheck {
            name: "ai-configuration".to_string(),
            status: CheckStatus::Pass,
            response_time: None,
            error: None,
            required: false,
        }
    }
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, status: CheckStatus, required: bool) -> ReadinessCheck {
        ReadinessCheck {
            name: name.to_string(),
            status,
            response_time: None,
            error: None,
            required,
        }
    }

    fn checker(config: DeckConfig) -> ReadinessChecker {
        ReadinessChecker::new(ReadinessCheckerOptions {
            config: Arc::new(config),
            prober: Prober::new(),
        })
    }

    fn full_config() -> DeckConfig {
        DeckConfig {
            api_base_url: Some("http://localhost:8000".to_string()),
            node_env: Some("development".to_string()),
            genai_api_key: Some("test-key".to_string()),
            genkit_env: Some("dev".to_string()),
        }
    }

    #[test]
    fn test_only_required_failures_block_readiness() {
        let checks = vec![
            check("backend-api", CheckStatus::Pass, true),
            check("ai-configuration", CheckStatus::Fail, false),
        ];
        assert!(is_ready(&checks));

        let checks = vec![
            check("backend-api", CheckStatus::Fail, true),
            check("ai-configuration", CheckStatus::Pass, false),
        ];
        assert!(!is_ready(&checks));

        assert!(is_ready(&[]));
    }

    #[tokio::test]
    async fn test_missing_backend_url_fails_as_config_check() {
        let result = checker(DeckConfig::default()).check_backend_api().await;

        assert_eq!(result.name, "backend-api-config");
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.required);
        assert_eq!(
            result.error.as_deref(),
            Some("NEXT_PUBLIC_API_URL is not configured")
        );
    }

    #[test]
    fn test_environment_check_passes_with_full_config() {
        let result = checker(full_config()).check_environment();

        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.error.is_none());
        assert!(result.required);
    }

    #[test]
    fn test_environment_check_warns_on_missing_optional_variables() {
        let config = DeckConfig {
            genai_api_key: None,
            genkit_env: None,
            ..full_config()
        };

        let result = checker(config).check_environment();

        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(
            result.error.as_deref(),
            Some("Optional environment variables not set: NEXT_PUBLIC_GENKIT_ENV, GOOGLE_GENAI_API_KEY")
        );
    }

    #[test]
    fn test_environment_check_fails_on_missing_required_variables() {
        let result = checker(DeckConfig::default()).check_environment();

        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.required);
        assert_eq!(
            result.error.as_deref(),
            Some("Missing required environment variables: NEXT_PUBLIC_API_URL, NODE_ENV")
        );
    }

    #[test]
    fn test_ai_check_fails_in_production_without_key() {
        let config = DeckConfig {
            node_env: Some("production".to_string()),
            ..Default::default()
        };

        let result = checker(config).check_ai_configuration();

        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.required);
        assert_eq!(
            result.error.as_deref(),
            Some("GOOGLE_GENAI_API_KEY is required in production")
        );
    }

    #[test]
    fn test_ai_check_notes_missing_configuration_outside_production() {
        let result = checker(DeckConfig::default()).check_ai_configuration();

        assert_eq!(result.status, CheckStatus::Pass);
        assert!(!result.required);
        assert_eq!(
            result.error.as_deref(),
            Some("AI configuration missing; some features may be unavailable")
        );
    }

    #[test]
    fn test_ai_check_passes_cleanly_when_configured() {
        let result = checker(full_config()).check_ai_configuration();

        assert_eq!(result.status, CheckStatus::Pass);
        assert!(!result.required);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_report_not_ready_when_backend_unconfigured() {
        let config = DeckConfig {
            node_env: Some("development".to_string()),
            ..Default::default()
        };

        let report = checker(config).check().await;

        assert!(!report.ready);
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.checks[0].name, "backend-api-config");
        assert_eq!(report.checks[1].name, "environment-variables");
        assert_eq!(report.checks[2].name, "ai-configuration");
        assert_eq!(report.environment, "development");
    }
}
