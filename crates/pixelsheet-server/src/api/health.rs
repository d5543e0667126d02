use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn banner() -> &'static str {
    "API for Pixel Mapper Backend"
}

async fn status() -> &'static str {
    "Status: OK"
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/api/status", get(status))
        .route("/health", get(health_check))
}
