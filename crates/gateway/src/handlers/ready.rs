//! Handler for the readiness endpoint.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};

use crate::handlers::no_cache_headers;
use crate::state::GatewayState;

/// Returns the readiness report: 200 when ready to receive traffic, 503
/// when a required check failed.
pub(crate) async fn ready_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    let started = Instant::now();

    let mut report = state.readiness.check().await;
    report.response_time = Some(format!("{}ms", started.elapsed().as_millis()));

    let status = if report.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, no_cache_headers(), Json(report))
}
