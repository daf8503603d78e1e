//! Handlers for the metrics endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use deck_metrics::{MetricsSnapshot, exposition};
use deck_probe::now_rfc3339;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::handlers::no_cache_headers;
use crate::state::GatewayState;

/// Query parameters accepted by the metrics endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetricsQuery {
    format: Option<String>,
}

/// Body of a custom metric report.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordMetricRequest {
    metric: Option<String>,
    value: Option<f64>,
}

fn take_snapshot(state: &GatewayState) -> MetricsSnapshot {
    state.metrics.snapshot(
        state.monitor.process_memory_bytes(),
        state.monitor.uptime_seconds(),
    )
}

/// Renders the current metrics.
///
/// The default rendering is the Prometheus text exposition; passing
/// `format=json` selects the JSON rendering instead. Both views come from
/// the same snapshot.
pub(crate) async fn metrics_handler(
    State(state): State<GatewayState>,
    Query(query): Query<MetricsQuery>,
) -> Response {
    let snapshot = take_snapshot(&state);

    if query.format.as_deref() == Some("json") {
        return (
            no_cache_headers(),
            Json(json!({
                "timestamp": now_rfc3339(),
                "metrics": snapshot,
                "meta": {
                    "version": deck_config::VERSION,
                    "environment": state.config.environment_name(),
                    "app": deck_metrics::APP_LABEL,
                },
            })),
        )
            .into_response();
    }

    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        no_cache_headers(),
        exposition(&snapshot),
    )
        .into_response()
}

/// Records a custom metric reported by a client.
///
/// Both `metric` and `value` are required. Unknown metric names are
/// accepted but only logged.
pub(crate) async fn record_metric_handler(
    State(state): State<GatewayState>,
    payload: Result<Json<RecordMetricRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to update metrics",
                    "message": rejection.body_text(),
                })),
            )
                .into_response();
        }
    };

    let (Some(metric), Some(value)) = (request.metric, request.value) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing required fields: metric, value" })),
        )
            .into_response();
    };

    match metric.as_str() {
        "active_connections" => state.metrics.set_active_connections(to_count(value)),
        "error_count" => state.metrics.add_errors(to_count(value)),
        _ => warn!("unknown metric type: {metric}"),
    }

    Json(json!({
        "success": true,
        "message": format!("Metric {metric} updated"),
        "timestamp": now_rfc3339(),
    }))
    .into_response()
}

/// Resets every counter to zero. Refused in production.
pub(crate) async fn reset_metrics_handler(State(state): State<GatewayState>) -> Response {
    if state.config.is_production() {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Metrics reset not allowed in production" })),
        )
            .into_response();
    }

    state.metrics.reset();

    Json(json!({
        "success": true,
        "message": "Metrics reset successfully",
        "timestamp": now_rfc3339(),
    }))
    .into_response()
}

// Negative values clamp to zero, fractional ones truncate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_count(value: f64) -> u64 {
    value as u64
}
