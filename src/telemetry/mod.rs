//! Tracing bootstrap with graceful degradation.
//!
//! Tracing is never a hard dependency of the service: if no collector is
//! configured, or the collector cannot be reached at boot, a no-op tracer
//! provider is installed and the service starts anyway. The outcome is a
//! [`TracingHandle`] that the caller keeps until shutdown.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! let tracing = telemetry::init().await;
//! // ... serve requests ...
//! if let Err(err) = tracing.teardown(Duration::from_secs(10)).await {
//!     tracing::warn!(error = %err, "span flush failed");
//! }
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init--> Active | Disabled --teardown--> Closed
//! ```
//!
//! There is no reconnect: a collector that is down at boot stays unused for
//! the life of the process.
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | Collector address (`host:port` or URI) | unset, tracing disabled |
//! | `ENVIRONMENT` | `deployment.environment` resource tag | empty |
//! | `RUST_LOG` | Log level filter | `info` |
//! | `LOG_FORMAT` | `pretty` or `json` | `pretty` |
//!
//! # Module Structure
//!
//! - [`api`]: Provider trait and initialization functions
//! - [`config`]: Configuration types
//! - [`error`]: Error types
//! - [`handle`]: The tracing session and its teardown
//! - [`otlp`]: OTLP/gRPC provider
//! - [`resource`]: Resource attributes
//! - [`trace`]: Log subscriber and OpenTelemetry bridge

#![allow(dead_code, unused_imports)] // Public API - not all items used internally

pub mod api;
pub mod config;
pub mod error;
pub mod handle;
pub mod otlp;
pub mod resource;
pub mod trace;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use api::{init, init_until, init_with_config, init_with_provider, TelemetryProvider};
pub use config::{LogFormat, TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use handle::{DisabledReason, TracingHandle};
