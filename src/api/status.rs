//! Liveness endpoint.

use axum::Json;

use crate::models::ServiceStatus;

/// GET / - Liveness check.
pub async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok".to_string(),
        message: "Defect report API".to_string(),
    })
}
