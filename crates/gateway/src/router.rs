//! Router assembly for the status endpoints.

use axum::Router;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{any, get};
use tower_http::cors::CorsLayer;

use crate::handlers::{
    health_handler, metrics_handler, ready_handler, record_metric_handler, reset_metrics_handler,
};
use crate::middleware::track_requests;
use crate::state::GatewayState;

/// Builds the router serving the status endpoints.
pub(crate) fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(
            "/metrics",
            get(metrics_handler)
                .post(record_metric_handler)
                .put(reset_metrics_handler),
        )
        .layer(from_fn_with_state(state.clone(), track_requests))
        .with_state(state)
        .fallback(any(|| async { (StatusCode::NOT_FOUND, "") }))
        .layer(CorsLayer::very_permissive())
}
