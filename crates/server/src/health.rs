//! Liveness endpoint

use axum::response::Json;
use serde::{Deserialize, Serialize};

/// Body of a liveness response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Always answers `{"status": "ok"}` while the process serves requests
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_body() {
        let Json(body) = health_handler().await;
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({"status": "ok"}));
    }
}
