mod api;
mod config;
mod error;
mod metrics;
mod shutdown;
mod telemetry;

use tracing::info;

use crate::config::ServerConfig;
use crate::error::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = ServerConfig::from_env()?;

    // Never fails: an absent or unreachable collector leaves tracing disabled
    let tracing = telemetry::init().await;

    let metrics = metrics::register()?;

    let (server, addrs) = api::server(&config, metrics)?;
    info!(?addrs, "listening");

    shutdown::serve_until(
        server,
        tracing,
        config.shutdown_timeout,
        shutdown::wait_for_signal(),
    )
    .await
}
