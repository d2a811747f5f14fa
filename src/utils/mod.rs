//! Utility functions module
//! 
//! Signal handling and display formatting shared across the crate.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::format_elapsed;
pub use signals::shutdown_signal;
