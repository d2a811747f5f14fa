//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{services::ViewSnapshot, state::SessionState};

/// API response structure for event endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// The event changed the session
    pub fn applied(message: String, session: SessionState) -> Self {
        Self::new("applied".to_string(), message, session)
    }

    /// The event was accepted but had nothing to do
    pub fn ignored(message: String, session: SessionState) -> Self {
        Self::new("ignored".to_string(), message, session)
    }

    pub fn error(message: String, session: SessionState) -> Self {
        Self::new("error".to_string(), message, session)
    }
}

/// Session, rendered view and controller metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub profile: String,
    pub session: SessionState,
    pub view: ViewSnapshot,
    pub ticker_active: bool,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
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

#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SettingRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectivityRequest {
    pub online: bool,
}
