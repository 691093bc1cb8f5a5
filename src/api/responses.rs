//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sync::{Rejection, SidebarView};

/// Reply to the user affordance endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    pub timestamp: DateTime<Utc>,
    pub sidebar: SidebarView,
}

impl ActionResponse {
    /// Create an accepted response
    pub fn accepted(message: String, sidebar: SidebarView) -> Self {
        Self {
            status: "accepted".to_string(),
            message,
            rejection: None,
            timestamp: Utc::now(),
            sidebar,
        }
    }

    /// Create a rejected response
    pub fn rejected(rejection: Rejection, sidebar: SidebarView) -> Self {
        Self {
            status: "rejected".to_string(),
            message: rejection.to_string(),
            rejection: Some(rejection),
            timestamp: Utc::now(),
            sidebar,
        }
    }
}

/// Status response: the rendered sidebar plus daemon metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub sidebar: SidebarView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Body of `POST /session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    pub logged_in: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
