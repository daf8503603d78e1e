//! Handler for the health endpoint.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use deck_health::HealthStatus;
use serde::Deserialize;

use crate::handlers::no_cache_headers;
use crate::state::GatewayState;

/// Query parameters accepted by the health endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HealthQuery {
    detailed: Option<String>,
}

/// Returns the health report.
///
/// A base report only carries process facts. Passing exactly
/// `detailed=true` probes the downstream services as well. Healthy and
/// degraded reports answer 200, unhealthy ones 503.
pub(crate) async fn health_handler(
    State(state): State<GatewayState>,
    Query(query): Query<HealthQuery>,
) -> impl IntoResponse {
    let started = Instant::now();

    let detailed = query.detailed.as_deref() == Some("true");
    let mut report = state.health.check(detailed).await;
    report.response_time = Some(format!("{}ms", started.elapsed().as_millis()));

    let status = match report.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, no_cache_headers(), Json(report))
}
