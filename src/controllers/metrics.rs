use actix_web::web::Data;
use actix_web::{HttpResponse, Responder, get};

use crate::metrics::AppMetrics;

/// Metrics endpoint for Prometheus scraping
///
/// Returns metrics in Prometheus text format
#[get("/metrics")]
pub async fn metrics(metrics: Data<AppMetrics>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics.render())
}
