use opentelemetry_otlp::{SpanExporter, WithTonicConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;

use crate::telemetry::api::TelemetryProvider;
use crate::telemetry::config::TelemetryConfig;
use crate::telemetry::error::TelemetryError;
use crate::telemetry::otlp::connect::connect;
use crate::telemetry::resource::build_resource;

/// Provider exporting to an OTLP collector over gRPC
/// - Dials the collector eagerly, bounded by the connect timeout
/// - Batches spans and ships them from a background worker
pub struct OtlpProvider;

impl TelemetryProvider for OtlpProvider {
    async fn build_tracer_provider(
        &self,
        config: &TelemetryConfig,
    ) -> Result<SdkTracerProvider, TelemetryError> {
        let endpoint = config.otlp_endpoint.as_deref().ok_or_else(|| {
            TelemetryError::InvalidEndpoint {
                endpoint: String::new(),
                reason: "no endpoint configured".to_string(),
            }
        })?;

        let channel = connect(endpoint, config.connect_timeout).await?;

        let exporter = SpanExporter::builder()
            .with_tonic()
            .with_channel(channel)
            .build()?;

        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(build_resource(config))
            .build();

        Ok(provider)
    }
}
