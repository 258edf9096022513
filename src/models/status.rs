//! Small fixed-shape payloads returned by the API.

use serde::{Deserialize, Serialize};

/// Liveness payload for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}

/// Confirmation payload for operations that return no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
