use std::fmt;
use std::time::Duration;

use opentelemetry::global;
use opentelemetry::trace::noop::NoopTracerProvider;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::{debug, info, warn};

use crate::telemetry::config::ENDPOINT_VAR;
use crate::telemetry::error::TelemetryError;

/// Why tracing is off for this process.
#[derive(Debug)]
pub enum DisabledReason {
    /// No collector endpoint was configured.
    NoEndpoint,
    /// A collector was configured but could not be used.
    Unavailable(TelemetryError),
}

impl fmt::Display for DisabledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEndpoint => write!(f, "{ENDPOINT_VAR} is not set"),
            Self::Unavailable(err) => write!(f, "{err}"),
        }
    }
}

/// The process-wide tracing session returned by `init`.
///
/// Either variant is a valid outcome of boot. The handle is consumed by
/// [`TracingHandle::teardown`], so a session can only be closed once.
#[derive(Debug)]
pub enum TracingHandle {
    /// Spans are batched and exported to `endpoint`.
    Active {
        provider: SdkTracerProvider,
        endpoint: String,
    },
    /// A no-op provider is installed; spans are discarded.
    Disabled(DisabledReason),
}

impl TracingHandle {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn tracer_provider(&self) -> Option<&SdkTracerProvider> {
        match self {
            Self::Active { provider, .. } => Some(provider),
            Self::Disabled(_) => None,
        }
    }

    pub fn disabled_reason(&self) -> Option<&DisabledReason> {
        match self {
            Self::Active { .. } => None,
            Self::Disabled(reason) => Some(reason),
        }
    }

    /// Install this session's provider as the global tracer provider.
    pub(crate) fn install(&self) {
        match self {
            Self::Active { provider, .. } => {
                global::set_text_map_propagator(TraceContextPropagator::new());
                global::set_tracer_provider(provider.clone());
            }
            Self::Disabled(_) => {
                global::set_tracer_provider(NoopTracerProvider::new());
            }
        }
    }

    pub(crate) fn log_outcome(&self) {
        match self {
            Self::Active { endpoint, .. } => {
                info!(endpoint = %endpoint, "tracing initialized");
            }
            Self::Disabled(DisabledReason::NoEndpoint) => {
                info!("no OTLP endpoint configured, tracing disabled");
            }
            Self::Disabled(DisabledReason::Unavailable(err)) => {
                warn!(error = %err, "tracing disabled");
            }
        }
    }

    /// Flush buffered spans and release the exporter.
    ///
    /// The flush runs on a blocking thread and is abandoned once `deadline`
    /// elapses. A disabled handle returns immediately.
    pub async fn teardown(self, deadline: Duration) -> Result<(), TelemetryError> {
        let Self::Active { provider, endpoint } = self else {
            return Ok(());
        };

        debug!(endpoint = %endpoint, ?deadline, "flushing spans");
        let flush = tokio::task::spawn_blocking(move || provider.shutdown());

        let result = match tokio::time::timeout(deadline, flush).await {
            Ok(Ok(shutdown)) => shutdown.map_err(TelemetryError::from),
            Ok(Err(join)) => Err(TelemetryError::Shutdown(join.to_string())),
            Err(_) => Err(TelemetryError::ShutdownTimeout(deadline)),
        };

        // Spans started from here on are discarded.
        global::set_tracer_provider(NoopTracerProvider::new());

        result
    }
}
