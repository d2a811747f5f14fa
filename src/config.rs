//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{profile::Profile, services::FileThemeStore};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "fixierun")]
#[command(about = "Session controller for the FixieRun fitness-rewards app")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// App variant: plain or cyberpunk
    #[arg(long, default_value = "plain")]
    pub profile: String,

    /// Preferences file holding the theme (defaults to the user config dir)
    #[arg(long)]
    pub preferences: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn resolve_profile(&self) -> Result<Profile, String> {
        Profile::from_name(&self.profile)
            .ok_or_else(|| format!("Unknown profile '{}', expected plain or cyberpunk", self.profile))
    }

    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences.clone().or_else(FileThemeStore::default_path)
    }
}
