use std::time::Duration;

use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tracing::debug;

use crate::telemetry::error::TelemetryError;

/// Normalize a collector address into a URI tonic can dial.
/// Bare `host:port` gets an `http://` scheme.
pub fn collector_uri(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

/// Establish a gRPC channel to the collector, giving up after `timeout`.
pub async fn connect(endpoint: &str, timeout: Duration) -> Result<Channel, TelemetryError> {
    let uri = collector_uri(endpoint);

    let mut target = Endpoint::from_shared(uri.clone())
        .map_err(|e| TelemetryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?
        .connect_timeout(timeout);

    if uri.starts_with("https://") {
        target = target
            .tls_config(ClientTlsConfig::new().with_native_roots())
            .map_err(|e| TelemetryError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
    }

    debug!(uri = %uri, ?timeout, "dialling collector");

    // connect_timeout covers the TCP dial only; this bounds the handshake too.
    match tokio::time::timeout(timeout, target.connect()).await {
        Ok(Ok(channel)) => Ok(channel),
        Ok(Err(source)) => Err(TelemetryError::Connect {
            endpoint: uri,
            source,
        }),
        Err(_) => Err(TelemetryError::ConnectTimeout {
            endpoint: uri,
            timeout,
        }),
    }
}
