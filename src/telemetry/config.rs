use std::env;
use std::time::Duration;

/// Service name attached to every span.
pub const SERVICE_NAME: &str = "orders-api";

/// Upper bound on dialling the collector at boot.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty human-readable format with colors (for local dev)
    #[default]
    Pretty,
    /// JSON structured format, one object per line
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Tracing and logging configuration, read once at boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    /// Collector address; `None` disables tracing.
    pub otlp_endpoint: Option<String>,
    /// Deployment tag, empty when unset.
    pub deployment_environment: String,
    pub connect_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl TelemetryConfig {
    /// Create config from environment variables.
    /// An empty `OTEL_EXPORTER_OTLP_ENDPOINT` counts as unset.
    pub fn from_env() -> Self {
        Self {
            service_name: SERVICE_NAME.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            otlp_endpoint: non_empty(env::var(ENDPOINT_VAR).ok()),
            deployment_environment: env::var(ENVIRONMENT_VAR).unwrap_or_default(),
            connect_timeout: CONNECT_TIMEOUT,
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: LogFormat::from_env(),
        }
    }

    /// Create a new config with explicit values and tracing disabled
    pub fn new(service_name: impl Into<String>, service_version: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            otlp_endpoint: None,
            deployment_environment: String::new(),
            connect_timeout: CONNECT_TIMEOUT,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }

    pub fn builder() -> TelemetryConfigBuilder {
        TelemetryConfigBuilder::default()
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = non_empty(Some(endpoint.into()));
        self
    }

    pub fn with_deployment_environment(mut self, environment: impl Into<String>) -> Self {
        self.deployment_environment = environment.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

#[derive(Default)]
pub struct TelemetryConfigBuilder {
    service_name: Option<String>,
    service_version: Option<String>,
    otlp_endpoint: Option<String>,
    deployment_environment: Option<String>,
    connect_timeout: Option<Duration>,
    log_level: Option<String>,
    log_format: Option<LogFormat>,
}

impl TelemetryConfigBuilder {
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    pub fn service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn deployment_environment(mut self, environment: impl Into<String>) -> Self {
        self.deployment_environment = Some(environment.into());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn log_format(mut self, format: LogFormat) -> Self {
        self.log_format = Some(format);
        self
    }

    pub fn json(self) -> Self {
        self.log_format(LogFormat::Json)
    }

    pub fn pretty(self) -> Self {
        self.log_format(LogFormat::Pretty)
    }

    pub fn build(self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self
                .service_name
                .unwrap_or_else(|| SERVICE_NAME.to_string()),
            service_version: self
                .service_version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            otlp_endpoint: non_empty(self.otlp_endpoint),
            deployment_environment: self.deployment_environment.unwrap_or_default(),
            connect_timeout: self.connect_timeout.unwrap_or(CONNECT_TIMEOUT),
            log_level: self.log_level.unwrap_or_else(|| "info".to_string()),
            log_format: self.log_format.unwrap_or_default(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to clean up env vars after tests
    struct EnvGuard {
        vars: Vec<&'static str>,
    }

    impl EnvGuard {
        fn new(vars: &[&'static str]) -> Self {
            Self { vars: vars.to_vec() }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn log_format_default_is_pretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn config_new_disables_tracing() {
        let config = TelemetryConfig::new("test-service", "1.0.0");

        assert_eq!(config.service_name, "test-service");
        assert_eq!(config.service_version, "1.0.0");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.connect_timeout, CONNECT_TIMEOUT);
        assert!(config.deployment_environment.is_empty());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn config_with_methods_chain() {
        let config = TelemetryConfig::new("svc", "1.0")
            .with_log_level("debug")
            .with_log_format(LogFormat::Json)
            .with_deployment_environment("staging")
            .with_connect_timeout(Duration::from_millis(250))
            .with_otlp_endpoint("localhost:4317");

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.deployment_environment, "staging");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.otlp_endpoint, Some("localhost:4317".to_string()));
    }

    #[test]
    fn blank_endpoint_counts_as_unset() {
        let config = TelemetryConfig::new("svc", "1.0").with_otlp_endpoint("   ");
        assert!(config.otlp_endpoint.is_none());

        let config = TelemetryConfig::builder().otlp_endpoint("").build();
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn builder_sets_all_fields() {
        let config = TelemetryConfigBuilder::default()
            .service_name("my-service")
            .service_version("2.0.0")
            .log_level("warn")
            .otlp_endpoint("http://collector:4317")
            .deployment_environment("prod")
            .connect_timeout(Duration::from_secs(1))
            .json()
            .build();

        assert_eq!(config.service_name, "my-service");
        assert_eq!(config.service_version, "2.0.0");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.deployment_environment, "prod");
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.otlp_endpoint, Some("http://collector:4317".to_string()));
    }

    #[test]
    fn builder_uses_defaults_when_not_set() {
        let config = TelemetryConfig::builder().pretty().build();

        assert_eq!(config.service_name, SERVICE_NAME);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.connect_timeout, CONNECT_TIMEOUT);
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn config_from_env_reads_tracing_variables() {
        let _guard = EnvGuard::new(&[ENDPOINT_VAR, ENVIRONMENT_VAR, "LOG_FORMAT"]);
        env::set_var(ENDPOINT_VAR, "otel-collector:4317");
        env::set_var(ENVIRONMENT_VAR, "staging");
        env::set_var("LOG_FORMAT", "json");

        let config = TelemetryConfig::from_env();

        assert_eq!(config.service_name, SERVICE_NAME);
        assert_eq!(config.otlp_endpoint, Some("otel-collector:4317".to_string()));
        assert_eq!(config.deployment_environment, "staging");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.connect_timeout, CONNECT_TIMEOUT);
    }
}
