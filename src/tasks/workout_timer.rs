//! Workout ticker and auto-completion tasks

use std::sync::Arc;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::Controller;

/// Periodic task advancing the simulated workout once per tick
pub async fn workout_ticker_task(controller: Arc<Controller>, generation: u64) {
    let period = controller.profile.tick_interval;
    info!("Starting workout ticker (generation {})", generation);

    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match controller.record_tick(generation) {
            Ok(Some(progress)) => {
                debug!(
                    "Workout tick: {}s, {} km",
                    progress.elapsed_seconds,
                    progress.distance_display()
                );
            }
            Ok(None) => {
                debug!("Workout ticker generation {} is stale, exiting", generation);
                break;
            }
            Err(e) => {
                error!("Failed to record workout tick: {}", e);
                break;
            }
        }
    }
}

/// Switch back to the home page once the workout has settled in
pub async fn workout_return_home_task(controller: Arc<Controller>, generation: u64) {
    let Some(delay) = controller.profile.return_home_delay else {
        return;
    };
    sleep(delay).await;

    match controller.return_home(generation) {
        Ok(true) => debug!("Returned home for workout generation {}", generation),
        Ok(false) => debug!("Return home for generation {} skipped", generation),
        Err(e) => error!("Failed to return home: {}", e),
    }
}

/// Delayed task completing the workout if it is still the one it was scheduled for
pub async fn workout_auto_complete_task(controller: Arc<Controller>, kind: String, generation: u64) {
    sleep(controller.profile.auto_complete_delay).await;

    match controller.complete_scheduled_workout(&kind, generation) {
        Ok(Some(reward)) => info!("Workout {} auto-completed, credited {}", kind, reward),
        Ok(None) => debug!("Auto-completion for generation {} skipped", generation),
        Err(e) => error!("Failed to auto-complete workout: {}", e),
    }
}
