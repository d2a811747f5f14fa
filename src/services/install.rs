//! Install host capability: passes installability through to the platform

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ControllerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// Host able to show the native install prompt
#[async_trait]
pub trait InstallHost: Send + Sync {
    async fn prompt(&self) -> Result<InstallOutcome>;
}

/// Host answering every prompt with a preset outcome
#[derive(Debug)]
pub struct ScriptedInstallHost {
    outcome: Mutex<InstallOutcome>,
}

impl ScriptedInstallHost {
    pub fn new(outcome: InstallOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
        }
    }

    pub fn set_outcome(&self, outcome: InstallOutcome) {
        if let Ok(mut current) = self.outcome.lock() {
            *current = outcome;
        }
    }
}

impl Default for ScriptedInstallHost {
    fn default() -> Self {
        Self::new(InstallOutcome::Accepted)
    }
}

#[async_trait]
impl InstallHost for ScriptedInstallHost {
    async fn prompt(&self) -> Result<InstallOutcome> {
        self.outcome
            .lock()
            .map(|o| *o)
            .map_err(|e| ControllerError::Install(e.to_string()))
    }
}
