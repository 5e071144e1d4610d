//! A liveness check for the API.

use axum::Json;
use serde::{Deserialize, Serialize};

/// The body returned by [get_health].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the server is answering requests.
    pub status: String,
}

/// A route handler that reports the server is up.
pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
    })
}
