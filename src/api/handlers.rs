use actix_web::{get, web, HttpResponse, Responder};
use metrics_exporter_prometheus::PrometheusHandle;
use rand::Rng;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

#[derive(Serialize)]
struct OrderPlaced {
    message: &'static str,
    orders_processed: u32,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(Health { status: "healthy" })
}

#[get("/orders")]
#[tracing::instrument(name = "orders_handler", fields(orders_processed))]
pub async fn orders() -> impl Responder {
    crate::metrics::inc_orders();

    let orders_processed = rand::thread_rng().gen_range(1..=100);
    tracing::Span::current().record("orders_processed", orders_processed);
    info!(orders_processed, "Order placed");

    HttpResponse::Ok().json(OrderPlaced {
        message: "Order placed successfully!",
        orders_processed,
    })
}

/// Prometheus text exposition
#[get("/metrics")]
pub async fn scrape(handle: web::Data<PrometheusHandle>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(handle.render())
}
