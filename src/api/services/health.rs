use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Application start time, used for the uptime report.
#[derive(Clone)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    uptime_seconds: i64,
}

/// GET /health - liveness probe
pub async fn health_check(start: web::Data<AppStartTime>) -> HttpResponse {
    let uptime = (Utc::now() - start.start_datetime).num_seconds();
    HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        uptime_seconds: uptime,
    })
}
