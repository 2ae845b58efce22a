use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::error;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run `SELECT 1`; `ok` and `failed` are the status labels to report.
async fn probe_database(
    pool: &Pool<Postgres>,
    ok: &'static str,
    failed: &'static str,
) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: ok,
            database: "connected",
            error: None,
        }),
        Err(e) => {
            error!("{} probe failed: {:?}", ok, e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: failed,
                database: "disconnected",
                error: Some(format!("Database error: {}", e)),
            })
        }
    }
}

/// Overall health including database connectivity.
#[get("/health")]
async fn health_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    probe_database(pool.get_ref(), "healthy", "unhealthy").await
}

/// Readiness probe. 503 while the database is unreachable.
#[get("/ready")]
async fn readiness_check(pool: web::Data<Pool<Postgres>>) -> impl Responder {
    probe_database(pool.get_ref(), "ready", "not_ready").await
}

/// Liveness probe. Never touches the database.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive",
        database: "not_checked",
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
