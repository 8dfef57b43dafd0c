use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};

use crate::telemetry::config::TelemetryConfig;

/// Resource key for the `ENVIRONMENT` tag, e.g. `staging` or `production`
pub const DEPLOYMENT_ENVIRONMENT: &str = "deployment.environment";

/// Attributes stamped on every span exported by this process
pub fn base_attributes(config: &TelemetryConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new(SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(SERVICE_VERSION, config.service_version.clone()),
        KeyValue::new(DEPLOYMENT_ENVIRONMENT, config.deployment_environment.clone()),
    ]
}

/// Build the resource for the tracer provider.
/// An empty deployment environment is kept as an empty tag.
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    Resource::builder()
        .with_attributes(base_attributes(config))
        .build()
}
