//! HTTP gateway serving the health, readiness, and metrics endpoints.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

mod error;
mod handlers;
mod middleware;
mod router;
mod state;

pub use error::Error;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use deck_config::DeckConfig;
use deck_health::{HealthChecker, ReadinessChecker};
use deck_metrics::{MetricsStore, SystemMonitor};
use parking_lot::Mutex;
use router::build_router;
use state::GatewayState;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::info;

/// Options for creating a `Gateway`.
pub struct GatewayOptions {
    /// Address to listen on. Port 0 picks a free port.
    pub listen_addr: SocketAddr,

    /// Deployment configuration.
    pub config: Arc<DeckConfig>,

    /// Health checker behind the health endpoint.
    pub health: Arc<HealthChecker>,

    /// Readiness checker behind the readiness endpoint.
    pub readiness: Arc<ReadinessChecker>,

    /// Process-lifetime metrics store.
    pub metrics: Arc<MetricsStore>,

    /// Monitor backing the process gauges.
    pub monitor: Arc<SystemMonitor>,
}

/// HTTP server exposing the status endpoints.
pub struct Gateway {
    listen_addr: SocketAddr,
    local_addr: Mutex<Option<SocketAddr>>,
    state: GatewayState,
    shutdown_token: CancellationToken,
    task_tracker: TaskTracker,
}

impl Gateway {
    /// Creates a new `Gateway`.
    #[must_use]
    pub fn new(
        GatewayOptions {
            listen_addr,
            config,
            health,
            readiness,
            metrics,
            monitor,
        }: GatewayOptions,
    ) -> Self {
        Self {
            listen_addr,
            local_addr: Mutex::new(None),
            state: GatewayState {
                config,
                health,
                readiness,
                metrics,
                monitor,
            },
            shutdown_token: CancellationToken::new(),
            task_tracker: TaskTracker::new(),
        }
    }

    /// Starts serving the status endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway was already started or the listen
    /// address cannot be bound.
    pub async fn start(&self) -> Result<JoinHandle<()>, Error> {
        if self.task_tracker.is_closed() {
            return Err(Error::AlreadyStarted);
        }

        let router = build_router(self.state.clone());

        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(Error::Bind)?;

        let local_addr = listener.local_addr().map_err(Error::Bind)?;
        *self.local_addr.lock() = Some(local_addr);
        info!("status gateway listening on {local_addr}");

        let shutdown_token = self.shutdown_token.clone();
        let handle = self.task_tracker.spawn(async move {
            tokio::select! {
                e = axum::serve(listener, router.into_make_service()).into_future() => {
                    info!("status gateway exited {e:?}");
                }
                () = shutdown_token.cancelled() => {}
            }
        });

        self.task_tracker.close();

        Ok(handle)
    }

    /// Address the gateway is bound to, available once started.
    #[must_use]
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.lock()
    }

    /// Stops the gateway and waits for the serve task to finish.
    pub async fn shutdown(&self) {
        info!("status gateway shutting down...");

        self.shutdown_token.cancel();
        self.task_tracker.wait().await;

        info!("status gateway shutdown");
    }
}
