//! Error types for the session controller

use std::io;

/// Errors raised by the controller and its capabilities
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The session mutex was poisoned by a panicking holder
    #[error("Failed to lock {0}")]
    LockPoisoned(&'static str),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("No panel for page: {0}")]
    MissingPanel(String),

    #[error("Preference store error: {0}")]
    Store(#[from] io::Error),

    #[error("Preference file is malformed: {0}")]
    MalformedPreferences(#[from] serde_json::Error),

    #[error("Wallet connection failed: {0}")]
    Wallet(String),

    #[error("Install request failed: {0}")]
    Install(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ControllerError>;
