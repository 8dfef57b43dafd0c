use std::future::Future;

use opentelemetry_sdk::trace::SdkTracerProvider;

use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::error::TelemetryError;
use crate::telemetry::handle::{DisabledReason, TracingHandle};
use crate::telemetry::otlp::OtlpProvider;
use crate::telemetry::trace::init_subscriber;

/// Trait for telemetry providers (OTLP collector, in-memory, etc.)
pub trait TelemetryProvider: Send + Sync {
    /// Build the tracer provider for this backend
    fn build_tracer_provider(
        &self,
        config: &TelemetryConfig,
    ) -> impl Future<Output = Result<SdkTracerProvider, TelemetryError>> + Send;
}

/// Initialize tracing with a specific provider.
///
/// Never fails: a missing endpoint, a provider error or `cancel` resolving
/// first all end in [`TracingHandle::Disabled`] with a no-op global provider.
/// Call once, before the server starts accepting requests.
pub async fn init_with_provider<P, C>(
    provider: &P,
    config: &TelemetryConfig,
    cancel: C,
) -> TracingHandle
where
    P: TelemetryProvider,
    C: Future<Output = ()>,
{
    let handle = match config.otlp_endpoint.as_deref() {
        None => TracingHandle::Disabled(DisabledReason::NoEndpoint),
        Some(endpoint) => {
            let built = tokio::select! {
                biased;
                _ = cancel => Err(TelemetryError::ConnectCancelled {
                    endpoint: endpoint.to_string(),
                }),
                result = provider.build_tracer_provider(config) => result,
            };

            match built {
                Ok(tracer_provider) => TracingHandle::Active {
                    provider: tracer_provider,
                    endpoint: endpoint.to_string(),
                },
                Err(err) => TracingHandle::Disabled(DisabledReason::Unavailable(err)),
            }
        }
    };

    handle.install();
    init_subscriber(&handle, config);
    handle.log_outcome();

    handle
}

/// Initialize OTLP tracing, giving up on the collector once `cancel` resolves
pub async fn init_until<C>(config: &TelemetryConfig, cancel: C) -> TracingHandle
where
    C: Future<Output = ()>,
{
    init_with_provider(&OtlpProvider, config, cancel).await
}

/// Initialize OTLP tracing with config
pub async fn init_with_config(config: &TelemetryConfig) -> TracingHandle {
    init_until(config, std::future::pending()).await
}

/// Initialize tracing from environment
pub async fn init() -> TracingHandle {
    let config = TelemetryConfig::from_env();
    init_with_config(&config).await
}
