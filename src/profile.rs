//! App variant profiles
//!
//! The plain and cyberpunk front-ends share every transition; they differ
//! only in what a profile carries: labels, notices, timer durations,
//! reward tables, available panels and chart datasets.

use std::{collections::HashMap, time::Duration};

use crate::{
    charts::{self, ChartSpec},
    state::{PageId, TokenAmount},
};

/// Notice templates. `{name}`-style placeholders are filled by [`fill`].
#[derive(Debug, Clone)]
pub struct Messages {
    pub theme_changed: String,
    pub dark_label: String,
    pub light_label: String,
    pub wallet_already_connected: String,
    pub wallet_connecting: String,
    pub wallet_connected: String,
    pub wallet_failed: String,
    pub select_workout: String,
    pub workout_started: String,
    pub workout_stopped: String,
    pub workout_completed: String,
    pub claim_succeeded: String,
    pub claim_unavailable: String,
    pub logging_out: String,
    pub upgrade_acquired: String,
    pub upgrade_already_acquired: String,
    pub setting_toggled: String,
    pub enabled_label: String,
    pub disabled_label: String,
    pub online: String,
    pub offline: String,
    pub install_ready: String,
    pub install_accepted: String,
    pub install_cancelled: String,
    pub install_deferred: String,
    pub installed: String,
    pub workout_button_start: String,
    pub workout_button_stop: String,
    pub connect_button_connected: String,
    pub claim_button_claimed: String,
}

/// Variant configuration for the controller
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub user_name: String,
    pub initial_balance: TokenAmount,
    /// Pages this variant ships a panel for
    pub panels: Vec<PageId>,
    pub page_titles: HashMap<PageId, String>,
    pub default_title: String,
    /// Notice shown when a page is entered
    pub page_notices: HashMap<PageId, String>,
    pub workout_labels: HashMap<String, String>,
    pub rewards: HashMap<String, TokenAmount>,
    pub default_reward: TokenAmount,
    pub claim_amount: TokenAmount,
    pub tick_interval: Duration,
    pub wallet_delay: Duration,
    pub auto_complete_delay: Duration,
    pub install_prompt_delay: Duration,
    /// Delay before a started workout switches back to the home page
    pub return_home_delay: Option<Duration>,
    /// Simulated distance covered per elapsed second
    pub distance_km_per_second: f64,
    pub speed_kmh: f64,
    pub messages: Messages,
    pub charts: Vec<ChartSpec>,
}

impl Profile {
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            user_name: "Alex Runner".to_string(),
            initial_balance: TokenAmount::ZERO,
            panels: vec![
                PageId::Home,
                PageId::Workouts,
                PageId::Rewards,
                PageId::Wallet,
                PageId::Profile,
            ],
            page_titles: HashMap::from([
                (PageId::Home, "FixieRun".to_string()),
                (PageId::Workouts, "Workouts".to_string()),
                (PageId::Rewards, "Rewards".to_string()),
                (PageId::Wallet, "Wallet".to_string()),
                (PageId::Profile, "Profile".to_string()),
            ]),
            default_title: "FixieRun".to_string(),
            page_notices: HashMap::new(),
            workout_labels: HashMap::from([
                ("running".to_string(), "Running".to_string()),
                ("walking".to_string(), "Walking".to_string()),
                ("cycling".to_string(), "Cycling".to_string()),
            ]),
            rewards: HashMap::from([
                ("running".to_string(), TokenAmount::whole(15)),
                ("walking".to_string(), TokenAmount::whole(10)),
                ("cycling".to_string(), TokenAmount::whole(25)),
            ]),
            default_reward: TokenAmount::whole(10),
            claim_amount: TokenAmount::from_hundredths(2340),
            tick_interval: Duration::from_secs(1),
            wallet_delay: Duration::from_millis(2000),
            auto_complete_delay: Duration::from_secs(15),
            install_prompt_delay: Duration::from_secs(30),
            return_home_delay: Some(Duration::from_secs(1)),
            distance_km_per_second: 0.003,
            speed_kmh: 4.5,
            messages: Messages {
                theme_changed: "{mode} mode enabled".to_string(),
                dark_label: "Dark".to_string(),
                light_label: "Light".to_string(),
                wallet_already_connected: "Wallet already connected".to_string(),
                wallet_connecting: "Connecting wallet...".to_string(),
                wallet_connected: "Wallet connected successfully!".to_string(),
                wallet_failed: "Wallet connection failed".to_string(),
                select_workout: "Select a workout type".to_string(),
                workout_started: "{workout} workout started!".to_string(),
                workout_stopped: "Workout stopped".to_string(),
                workout_completed: "{workout} workout complete! +{reward} FIXIE earned".to_string(),
                claim_succeeded: "{amount} FIXIE claimed successfully!".to_string(),
                claim_unavailable: "Rewards already claimed".to_string(),
                logging_out: "Logging out...".to_string(),
                upgrade_acquired: "{upgrade} acquired".to_string(),
                upgrade_already_acquired: "{upgrade} already acquired".to_string(),
                setting_toggled: "{setting} {state}".to_string(),
                enabled_label: "enabled".to_string(),
                disabled_label: "disabled".to_string(),
                online: "Connection restored".to_string(),
                offline: "Offline mode enabled".to_string(),
                install_ready: "FixieRun is ready to install".to_string(),
                install_accepted: "Installing...".to_string(),
                install_cancelled: "Installation cancelled".to_string(),
                install_deferred: "Installation deferred".to_string(),
                installed: "FixieRun installed successfully!".to_string(),
                workout_button_start: "START WORKOUT".to_string(),
                workout_button_stop: "STOP WORKOUT".to_string(),
                connect_button_connected: "Connected".to_string(),
                claim_button_claimed: "Claimed".to_string(),
            },
            charts: charts::plain_charts(),
        }
    }

    pub fn cyberpunk() -> Self {
        Self {
            name: "cyberpunk".to_string(),
            user_name: "CYBER.RUNNER".to_string(),
            initial_balance: TokenAmount::whole(1247),
            panels: vec![
                PageId::Home,
                PageId::Defi,
                PageId::Analytics,
                PageId::Workouts,
                PageId::Rewards,
                PageId::Profile,
            ],
            page_titles: HashMap::from([
                (PageId::Home, "QUANTUM DASHBOARD".to_string()),
                (PageId::Defi, "BLOCKCHAIN MATRIX".to_string()),
                (PageId::Analytics, "DATA NEXUS".to_string()),
                (PageId::Workouts, "TRAINING PROTOCOLS".to_string()),
                (PageId::Rewards, "CYBER MARKETPLACE".to_string()),
                (PageId::Profile, "USER INTERFACE".to_string()),
            ]),
            default_title: "NEURAL INTERFACE".to_string(),
            page_notices: HashMap::from([
                (PageId::Defi, "BLOCKCHAIN SYNC IN PROGRESS".to_string()),
                (PageId::Workouts, "SCANNING TRAINING PROTOCOLS".to_string()),
                (PageId::Rewards, "MARKETPLACE DATA UPDATED".to_string()),
                (PageId::Profile, "USER INTERFACE VALIDATED".to_string()),
            ]),
            workout_labels: HashMap::from([
                ("neural-sprint".to_string(), "NEURAL SPRINT".to_string()),
                ("quantum-cruise".to_string(), "QUANTUM CRUISE".to_string()),
                ("matrix-override".to_string(), "MATRIX OVERRIDE".to_string()),
            ]),
            rewards: HashMap::from([
                ("neural-sprint".to_string(), TokenAmount::whole(15)),
                ("quantum-cruise".to_string(), TokenAmount::whole(15)),
                ("matrix-override".to_string(), TokenAmount::whole(15)),
            ]),
            default_reward: TokenAmount::whole(10),
            claim_amount: TokenAmount::from_hundredths(2340),
            tick_interval: Duration::from_secs(1),
            wallet_delay: Duration::from_millis(2500),
            auto_complete_delay: Duration::from_secs(3),
            install_prompt_delay: Duration::from_secs(15),
            return_home_delay: None,
            distance_km_per_second: 0.003,
            speed_kmh: 4.5,
            messages: Messages {
                theme_changed: "{mode} MODE ENGAGED".to_string(),
                dark_label: "DARK".to_string(),
                light_label: "LIGHT".to_string(),
                wallet_already_connected: "NEURAL WALLET ALREADY SYNCHRONIZED".to_string(),
                wallet_connecting: "NEURAL WALLET CONNECTION INITIATED".to_string(),
                wallet_connected: "NEURAL WALLET SYNCHRONIZED".to_string(),
                wallet_failed: "NEURAL WALLET SYNC FAILURE".to_string(),
                select_workout: "SELECT PROTOCOL TYPE".to_string(),
                workout_started: "{workout} PROTOCOL ACTIVE".to_string(),
                workout_stopped: "PROTOCOL TERMINATED".to_string(),
                workout_completed: "{workout} EXECUTION COMPLETE: +{reward} QUANTUM TOKENS EARNED"
                    .to_string(),
                claim_succeeded: "{amount} QUANTUM TOKENS CLAIMED".to_string(),
                claim_unavailable: "NEURAL REWARDS ALREADY CLAIMED".to_string(),
                logging_out: "DISCONNECTING NEURAL SESSION...".to_string(),
                upgrade_acquired: "{upgrade} ACQUIRED".to_string(),
                upgrade_already_acquired: "{upgrade} ALREADY INSTALLED".to_string(),
                setting_toggled: "{setting} {state}".to_string(),
                enabled_label: "ENABLED".to_string(),
                disabled_label: "DISABLED".to_string(),
                online: "NETWORK CONNECTION RESTORED".to_string(),
                offline: "OFFLINE MODE ACTIVATED".to_string(),
                install_ready: "NEURAL INTERFACE READY FOR INSTALLATION".to_string(),
                install_accepted: "NEURAL INTERFACE INSTALLATION INITIATED".to_string(),
                install_cancelled: "INSTALLATION CANCELLED".to_string(),
                install_deferred: "INSTALLATION DEFERRED".to_string(),
                installed: "NEURAL INTERFACE INSTALLED".to_string(),
                workout_button_start: "INITIATE PROTOCOL".to_string(),
                workout_button_stop: "TERMINATE PROTOCOL".to_string(),
                connect_button_connected: "SYNCHRONIZED".to_string(),
                claim_button_claimed: "CLAIMED".to_string(),
            },
            charts: charts::cyberpunk_charts(),
        }
    }

    /// Get a profile by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "plain" => Some(Self::plain()),
            "cyberpunk" | "cyber" => Some(Self::cyberpunk()),
            _ => None,
        }
    }

    /// Reward for a completed workout; unknown kinds get the default reward
    pub fn reward_for(&self, kind: &str) -> TokenAmount {
        self.rewards.get(kind).copied().unwrap_or(self.default_reward)
    }

    pub fn workout_label(&self, kind: &str) -> String {
        self.workout_labels
            .get(kind)
            .cloned()
            .unwrap_or_else(|| kind.to_string())
    }

    pub fn page_title(&self, page: PageId) -> &str {
        self.page_titles
            .get(&page)
            .map(String::as_str)
            .unwrap_or(&self.default_title)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::plain()
    }
}

/// Fill `{key}` placeholders in a notice template
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{}}}", key), value)
        })
}
