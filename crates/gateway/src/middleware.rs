//! Request tracking middleware feeding the metrics store.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::GatewayState;

/// Counts every routed request and records its duration.
///
/// The count is bumped before the handler runs, so a metrics rendering
/// includes the request serving it. The duration lands in the store only
/// after the response is built, so a rendering reports the previous
/// tracked request, not itself. Server errors also bump the error total.
pub(crate) async fn track_requests(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    state.metrics.increment_requests();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        state.metrics.add_errors(1);
    }
    state
        .metrics
        .record_request_duration(started.elapsed().as_secs_f64());

    response
}
