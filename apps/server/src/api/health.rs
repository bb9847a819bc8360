use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct HealthStatus {
    status: &'static str,
    timestamp: i64,
}

/// Liveness probe.
pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP",
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}
