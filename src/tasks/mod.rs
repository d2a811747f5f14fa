//! Background tasks module
//! 
//! Fire-and-forget timers scheduled by the controller. Each task carries
//! the generation it was scheduled under and does nothing once stale.

pub mod delayed;
pub mod workout_timer;

// Re-export main functions
pub use delayed::{install_prompt_task, wallet_connect_task};
pub use workout_timer::{workout_auto_complete_task, workout_return_home_task, workout_ticker_task};
