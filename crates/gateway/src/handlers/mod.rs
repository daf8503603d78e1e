//! HTTP handlers for the status endpoints.

mod health;
mod metrics;
mod ready;

pub(crate) use health::health_handler;
pub(crate) use metrics::{metrics_handler, record_metric_handler, reset_metrics_handler};
pub(crate) use ready::ready_handler;

use axum::http::HeaderName;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};

/// Headers preventing caches and proxies from serving stale status responses.
pub(crate) fn no_cache_headers() -> [(HeaderName, &'static str); 3] {
    [
        (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (PRAGMA, "no-cache"),
        (EXPIRES, "0"),
    ]
}
