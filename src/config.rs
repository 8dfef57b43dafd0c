use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PORT: u16 = 5000;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Time allowed for a client to send the request head.
    pub request_timeout: Duration,
    pub keep_alive: Duration,
    /// Total window for stopping the server and flushing spans.
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(5),
            keep_alive: Duration::from_secs(60),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`; everything else keeps its default.
    pub fn from_env() -> AppResult<Self> {
        let port = match env::var("PORT") {
            Ok(port) if !port.is_empty() => parse_port(&port)?,
            _ => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            ..Self::default()
        })
    }

    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

fn parse_port(value: &str) -> AppResult<u16> {
    value
        .parse()
        .map_err(|e| AppError::Config(format!("PORT must be a number, got {value:?}: {e}")))
}
