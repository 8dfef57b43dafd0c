//! OTLP/gRPC telemetry provider.
//!
//! Dials the collector named by `OTEL_EXPORTER_OTLP_ENDPOINT` before building
//! the exporter, so an unreachable collector is detected at boot instead of on
//! the first export.
//!
//! # Behavior
//!
//! - `host:port` endpoints are dialled as `http://host:port`
//! - `https://` endpoints use TLS with the platform's native roots
//! - The dial is bounded by [`TelemetryConfig::connect_timeout`]
//!
//! # Example
//!
//! ```rust,ignore
//! use telemetry::otlp::OtlpProvider;
//! use telemetry::{TelemetryConfig, api::init_with_provider};
//!
//! let config = TelemetryConfig::from_env();
//! let handle = init_with_provider(&OtlpProvider, &config, std::future::pending()).await;
//! ```
//!
//! [`TelemetryConfig::connect_timeout`]: crate::telemetry::TelemetryConfig

mod connect;
mod provider;

pub use connect::{collector_uri, connect};
pub use provider::OtlpProvider;
