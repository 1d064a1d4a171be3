use axum::Json;

use crate::web::types::HealthResponse;

/// Liveness probe, plain text.
pub async fn home() -> &'static str {
    "OK"
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
