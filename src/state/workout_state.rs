//! Workout state structure and management

use serde::{Deserialize, Serialize};

use crate::utils::format_elapsed;

/// Simulated workout progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutState {
    pub active: bool,
    /// Workout type key as sent by the event source, e.g. "cycling"
    pub kind: Option<String>,
    pub elapsed_seconds: u64,
    pub distance_km: f64,
    pub speed_kmh: f64,
}

impl WorkoutState {
    /// Create an idle workout state
    pub fn new() -> Self {
        Self {
            active: false,
            kind: None,
            elapsed_seconds: 0,
            distance_km: 0.0,
            speed_kmh: 0.0,
        }
    }

    /// Create an active workout state with zeroed counters
    pub fn started(kind: &str) -> Self {
        Self {
            active: true,
            kind: Some(kind.to_string()),
            ..Self::new()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Elapsed time as shown on the GPS panel
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    pub fn distance_display(&self) -> String {
        format!("{:.2}", self.distance_km)
    }

    pub fn speed_display(&self) -> String {
        format!("{:.1}", self.speed_kmh)
    }
}

impl Default for WorkoutState {
    fn default() -> Self {
        Self::new()
    }
}
