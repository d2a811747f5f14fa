//! Capability module
//! 
//! Traits the controller is injected with, each with a simulated or
//! in-memory implementation.

pub mod install;
pub mod preferences;
pub mod sensor;
pub mod view;
pub mod wallet;

// Re-export main types
pub use install::{InstallHost, InstallOutcome, ScriptedInstallHost};
pub use preferences::{resolve_theme, system_theme, FileThemeStore, MemoryThemeStore, ThemeStore};
pub use sensor::{SimulatedSensor, WorkoutSensor};
pub use view::{HeadlessView, Notification, Severity, View, ViewSnapshot};
pub use wallet::{SimulatedWallet, WalletClient};
