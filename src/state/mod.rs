//! State management module
//! 
//! The session record, its value types, and the controller that owns it.

pub mod controller;
pub mod session_state;
pub mod workout_state;

// Re-export main types
pub use controller::{Capabilities, Controller};
pub use session_state::{InstallState, PageId, SessionState, Theme, TokenAmount, WalletStatus};
pub use workout_state::WorkoutState;
