use thiserror::Error;

/// Errors that stop the service from booting or serving.
///
/// Tracing problems never show up here; they degrade to a disabled
/// [`TracingHandle`](crate::telemetry::TracingHandle) instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("metrics recorder error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type AppResult<T> = Result<T, AppError>;
