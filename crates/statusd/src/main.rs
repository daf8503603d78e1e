//! Binary serving the control deck status endpoints.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

use error::Result;

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use deck_config::{DeckConfig, non_empty};
use deck_gateway::{Gateway, GatewayOptions};
use deck_health::{
    HealthChecker, HealthCheckerOptions, ReadinessChecker, ReadinessCheckerOptions,
    default_targets,
};
use deck_metrics::{MetricsStore, SystemMonitor};
use deck_probe::Prober;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Port to serve the status endpoints on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Host the backend services are probed at
    #[arg(long, default_value = "localhost")]
    probe_host: String,

    /// Time budget for a single downstream probe, in milliseconds
    #[arg(long, default_value_t = 3000, value_parser = clap::value_parser!(u64).range(1..))]
    probe_timeout_ms: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value_t = Level::INFO)]
    log_level: Level,

    /// Base URL of the backend API
    #[arg(long, env = deck_config::API_BASE_URL_VAR)]
    api_base_url: Option<String>,

    /// Deployment environment name
    #[arg(long, env = deck_config::NODE_ENV_VAR)]
    node_env: Option<String>,

    /// Google GenAI API key
    #[arg(long, env = deck_config::GENAI_API_KEY_VAR, hide_env_values = true)]
    genai_api_key: Option<String>,

    /// Genkit environment name
    #[arg(long, env = deck_config::GENKIT_ENV_VAR)]
    genkit_env: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(args.log_level)
            .finish(),
    )?;

    let config = Arc::new(DeckConfig {
        api_base_url: non_empty(args.api_base_url),
        node_env: non_empty(args.node_env),
        genai_api_key: non_empty(args.genai_api_key),
        genkit_env: non_empty(args.genkit_env),
    });

    let monitor = Arc::new(SystemMonitor::new());
    let metrics = Arc::new(MetricsStore::new());
    let prober = Prober::with_timeout(Duration::from_millis(args.probe_timeout_ms));

    let health = Arc::new(HealthChecker::new(HealthCheckerOptions {
        config: config.clone(),
        monitor: monitor.clone(),
        prober: prober.clone(),
        targets: default_targets(&args.probe_host),
    }));

    let readiness = Arc::new(ReadinessChecker::new(ReadinessCheckerOptions {
        config: config.clone(),
        prober,
    }));

    let gateway = Gateway::new(GatewayOptions {
        listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port)),
        config: config.clone(),
        health,
        readiness,
        metrics,
        monitor,
    });

    let gateway_handle = gateway.start().await?;

    info!(
        "Status endpoints available on http://0.0.0.0:{} ({} environment)",
        args.port,
        config.environment_name()
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            let () = gateway.shutdown().await;
        }
        _ = gateway_handle => {
            error!("Gateway exited");
        }
    }

    Ok(())
}
