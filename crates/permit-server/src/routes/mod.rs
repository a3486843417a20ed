//! API routes

pub mod audit;
pub mod diagnostics;
pub mod notify;
pub mod permits;
pub mod proxy;
pub mod upload;
pub mod users;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
