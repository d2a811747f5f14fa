//! Workout sensor capability

/// Source of workout metrics for an elapsed duration
pub trait WorkoutSensor: Send + Sync {
    fn distance_km(&self, elapsed_seconds: u64) -> f64;
    fn speed_kmh(&self, elapsed_seconds: u64) -> f64;
}

/// Constant-pace sensor, no hardware involved
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    pub km_per_second: f64,
    pub speed_kmh: f64,
}

impl SimulatedSensor {
    pub fn new(km_per_second: f64, speed_kmh: f64) -> Self {
        Self { km_per_second, speed_kmh }
    }
}

impl WorkoutSensor for SimulatedSensor {
    fn distance_km(&self, elapsed_seconds: u64) -> f64 {
        elapsed_seconds as f64 * self.km_per_second
    }

    fn speed_kmh(&self, _elapsed_seconds: u64) -> f64 {
        self.speed_kmh
    }
}
