//! Deployment configuration shared by the status endpoints.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::env;

/// Environment variable holding the backend API base URL.
pub const API_BASE_URL_VAR: &str = "NEXT_PUBLIC_API_URL";

/// Environment variable holding the deployment environment name.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Environment variable holding the Google GenAI API key.
pub const GENAI_API_KEY_VAR: &str = "GOOGLE_GENAI_API_KEY";

/// Environment variable holding the Genkit environment name.
pub const GENKIT_ENV_VAR: &str = "NEXT_PUBLIC_GENKIT_ENV";

/// Version reported by the status endpoints.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Deployment configuration read from the process environment.
///
/// Every value is optional. Empty strings count as unset so that blank
/// values in container manifests do not register as configured.
#[derive(Clone, Debug, Default)]
pub struct DeckConfig {
    /// Base URL of the backend API, e.g. `http://backend-pro1-api:8000`.
    pub api_base_url: Option<String>,

    /// Deployment environment name, e.g. `production`.
    pub node_env: Option<String>,

    /// Google GenAI API key used by the AI features.
    pub genai_api_key: Option<String>,

    /// Genkit environment name, e.g. `dev`.
    pub genkit_env: Option<String>,
}

impl DeckConfig {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_base_url: non_empty(env::var(API_BASE_URL_VAR).ok()),
            node_env: non_empty(env::var(NODE_ENV_VAR).ok()),
            genai_api_key: non_empty(env::var(GENAI_API_KEY_VAR).ok()),
            genkit_env: non_empty(env::var(GENKIT_ENV_VAR).ok()),
        }
    }

    /// Returns the environment name, defaulting to `development` when unset.
    #[must_use]
    pub fn environment_name(&self) -> &str {
        self.node_env.as_deref().unwrap_or("development")
    }

    /// Whether the deployment environment is production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.node_env.as_deref() == Some("production")
    }
}

/// Drops empty strings so they count as unset.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
