use std::error::Error as StdError;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while bringing tracing up or down.
///
/// None of these abort the service: connect and exporter failures turn into
/// [`DisabledReason::Unavailable`](crate::telemetry::DisabledReason), shutdown
/// failures are logged by the caller.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid collector endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to connect to collector at {endpoint}: {}", with_causes(.source))]
    Connect {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("timed out connecting to collector at {endpoint} after {timeout:?}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    #[error("connection to collector at {endpoint} was cancelled")]
    ConnectCancelled { endpoint: String },

    #[error("exporter error: {0}")]
    Exporter(String),

    #[error("tracer provider shutdown failed: {0}")]
    Shutdown(String),

    #[error("tracer provider shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

impl TelemetryError {
    /// True for every failure to reach the collector at boot.
    pub fn is_connect_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint { .. }
                | Self::Connect { .. }
                | Self::ConnectTimeout { .. }
                | Self::ConnectCancelled { .. }
        )
    }
}

/// Render an error followed by its `source()` chain, `outer: inner: root`.
///
/// tonic's transport error displays only as "transport error"; the refusal or
/// resolver failure sits further down the chain.
fn with_causes(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}

impl From<opentelemetry_otlp::ExporterBuildError> for TelemetryError {
    fn from(err: opentelemetry_otlp::ExporterBuildError) -> Self {
        Self::Exporter(err.to_string())
    }
}

impl From<opentelemetry_sdk::error::OTelSdkError> for TelemetryError {
    fn from(err: opentelemetry_sdk::error::OTelSdkError) -> Self {
        Self::Shutdown(err.to_string())
    }
}
