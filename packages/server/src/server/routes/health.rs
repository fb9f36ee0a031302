use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

const STORE_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Probes the resolution store. Returns 200 OK when it answers within five
/// seconds, 503 Service Unavailable otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let db_health = match tokio::time::timeout(
        STORE_PROBE_TIMEOUT,
        state.deps.resolutions.health_check(),
    )
    .await
    {
        Ok(Ok(())) => DatabaseHealth {
            status: "ok".to_string(),
            error: None,
        },
        Ok(Err(e)) => DatabaseHealth {
            status: "error".to_string(),
            error: Some(format!("Query failed: {}", e)),
        },
        Err(_) => DatabaseHealth {
            status: "error".to_string(),
            error: Some("Query timeout (>5s)".to_string()),
        },
    };

    let is_healthy = db_health.status == "ok";
    let (status_code, overall_status) = if is_healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall_status.to_string(),
            database: db_health,
        }),
    )
}
