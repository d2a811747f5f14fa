//! FixieRun - session controller for a fitness-rewards demo app
//! 
//! The controller keeps the session record (page, wallet, token balance,
//! workout, theme), schedules the simulated timers, and renders through an
//! injected view. An HTTP surface delivers UI events to it.

pub mod api;
pub mod charts;
pub mod config;
pub mod error;
pub mod profile;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::{create_router, ApiContext};
pub use config::Config;
pub use error::ControllerError;
pub use profile::Profile;
pub use state::{Capabilities, Controller, SessionState};
pub use utils::signals::shutdown_signal;
