//! HTTP surface: `/health`, `/orders` and `/metrics`.

mod handlers;

use std::net::SocketAddr;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing_actix_web::TracingLogger;

use crate::config::ServerConfig;

/// Route table
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health)
        .service(handlers::orders)
        .service(handlers::scrape);
}

/// Bind the server without starting it.
///
/// OS signals are left to the caller so tracing can be flushed after the
/// server stops.
pub fn server(
    config: &ServerConfig,
    metrics: PrometheusHandle,
) -> std::io::Result<(Server, Vec<SocketAddr>)> {
    let metrics = web::Data::new(metrics);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(metrics.clone())
            .configure(configure)
    })
    .client_request_timeout(config.request_timeout)
    .keep_alive(config.keep_alive)
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .disable_signals()
    .bind(config.addr())?;

    let addrs = server.addrs();
    Ok((server.run(), addrs))
}
