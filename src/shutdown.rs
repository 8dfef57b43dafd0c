//! Process shutdown: stop accepting, drain, then flush spans.

use std::future::Future;
use std::time::Duration;

use actix_web::dev::Server;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use crate::error::AppResult;
use crate::telemetry::TracingHandle;

/// Resolves on SIGINT or SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Run `server` until `signal` resolves, then stop it and tear tracing down,
/// all within `window`.
///
/// Tracing is torn down even if the server exits on its own. Teardown errors
/// are logged, never returned.
pub async fn serve_until<F>(
    server: Server,
    tracing: TracingHandle,
    window: Duration,
    signal: F,
) -> AppResult<()>
where
    F: Future<Output = ()>,
{
    let handle = server.handle();
    let mut server_task = tokio::spawn(server);

    let exited = tokio::select! {
        result = &mut server_task => Some(result),
        _ = signal => None,
    };

    let deadline = Instant::now() + window;
    let outcome = match exited {
        Some(result) => {
            warn!("server exited before a shutdown signal");
            flatten(result)
        }
        None => {
            info!("shutting down server...");
            if timeout_at(deadline, handle.stop(true)).await.is_err() {
                warn!(?window, "graceful shutdown timed out");
            }
            let outcome = join_before(deadline, server_task).await;
            info!("server stopped");
            outcome
        }
    };

    let remaining = deadline.saturating_duration_since(Instant::now());
    match tracing.teardown(remaining).await {
        Ok(()) => info!("tracing shut down"),
        Err(err) => warn!(error = %err, "tracing shutdown failed"),
    }

    outcome
}

async fn join_before(
    deadline: Instant,
    task: JoinHandle<std::io::Result<()>>,
) -> AppResult<()> {
    match timeout_at(deadline, task).await {
        Ok(result) => flatten(result),
        Err(_) => Ok(()),
    }
}

fn flatten(result: Result<std::io::Result<()>, tokio::task::JoinError>) -> AppResult<()> {
    Ok(result??)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    use super::*;
    use crate::api;
    use crate::config::ServerConfig;
    use crate::telemetry::DisabledReason;

    fn local_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::default()
        }
    }

    async fn get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[actix_web::test]
    async fn signal_stops_server_and_returns() {
        let (server, addrs) = api::server(&local_config(), crate::metrics::test_handle()).unwrap();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let tracing = TracingHandle::Disabled(DisabledReason::NoEndpoint);

        let client = async move {
            let response = get(addrs[0], "/health").await;
            stop_tx.send(()).unwrap();
            response
        };
        let serving = serve_until(server, tracing, Duration::from_secs(10), async move {
            let _ = stop_rx.await;
        });

        let (result, response) = tokio::time::timeout(Duration::from_secs(10), async {
            tokio::join!(serving, client)
        })
        .await
        .expect("shutdown finishes within the window");

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("healthy"));
        assert!(result.is_ok());
    }

    #[actix_web::test]
    async fn immediate_signal_still_tears_down() {
        let (server, _) = api::server(&local_config(), crate::metrics::test_handle()).unwrap();
        let tracing = TracingHandle::Disabled(DisabledReason::NoEndpoint);

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            serve_until(server, tracing, Duration::from_secs(10), std::future::ready(())),
        )
        .await
        .expect("shutdown finishes within the window");

        assert!(result.is_ok());
    }
}
