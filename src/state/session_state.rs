//! Session state structure and the value types it is made of

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::WorkoutState;
use crate::{error::ControllerError, profile::Profile};

/// Pages the app can show, one panel each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Defi,
    Analytics,
    Workouts,
    Rewards,
    Wallet,
    Profile,
}

impl PageId {
    pub const ALL: [PageId; 7] = [
        PageId::Home,
        PageId::Defi,
        PageId::Analytics,
        PageId::Workouts,
        PageId::Rewards,
        PageId::Wallet,
        PageId::Profile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Defi => "defi",
            PageId::Analytics => "analytics",
            PageId::Workouts => "workouts",
            PageId::Rewards => "rewards",
            PageId::Wallet => "wallet",
            PageId::Profile => "profile",
        }
    }

    /// Element id of the panel backing this page
    pub fn panel_id(&self) -> String {
        format!("{}-page", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = ControllerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .iter()
            .copied()
            .find(|page| page.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ControllerError::UnknownPage(s.to_string()))
    }
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Wallet link status; only ever moves forward until a reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Progress of the deferred app install offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallState {
    #[default]
    NotAvailable,
    Deferred,
    Prompting,
    Installed,
}

/// Token amount held as exact hundredths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TokenAmount(u64);

impl TokenAmount {
    pub const ZERO: TokenAmount = TokenAmount(0);

    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    pub const fn whole(tokens: u64) -> Self {
        Self(tokens * 100)
    }

    pub fn hundredths(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, other: TokenAmount) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for TokenAmount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if frac.len() > 2 {
            return Err(format!("Token amount has more than two decimals: {}", s));
        }
        let whole: u64 = whole
            .parse()
            .map_err(|e| format!("Invalid token amount {}: {}", s, e))?;
        let frac: u64 = if frac.is_empty() {
            0
        } else {
            let parsed: u64 = frac
                .parse()
                .map_err(|e| format!("Invalid token amount {}: {}", s, e))?;
            if frac.len() == 1 { parsed * 10 } else { parsed }
        };
        whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(frac))
            .map(Self)
            .ok_or_else(|| format!("Token amount out of range: {}", s))
    }
}

impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Session state structure - everything the UI shows about the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub user_name: String,
    pub current_page: PageId,
    pub wallet: WalletStatus,
    pub token_balance: TokenAmount,
    /// Rewards credited by completed workouts this session
    pub total_earned: TokenAmount,
    pub workout: WorkoutState,
    pub theme: Theme,
    /// Claim control guard, cleared by a claim and restored by a reload
    pub claim_available: bool,
    pub online: bool,
    pub install: InstallState,
    pub acquired_upgrades: BTreeSet<String>,
}

impl SessionState {
    /// Create the initial session for a profile
    pub fn new(profile: &Profile, theme: Theme) -> Self {
        Self {
            user_name: profile.user_name.clone(),
            current_page: PageId::Home,
            wallet: WalletStatus::Disconnected,
            token_balance: profile.initial_balance,
            total_earned: TokenAmount::ZERO,
            workout: WorkoutState::new(),
            theme,
            claim_available: true,
            online: true,
            install: InstallState::NotAvailable,
            acquired_upgrades: BTreeSet::new(),
        }
    }

    pub fn wallet_connected(&self) -> bool {
        self.wallet == WalletStatus::Connected
    }

    /// Credit tokens to the balance; the balance never goes down here
    pub fn credit(&mut self, amount: TokenAmount) {
        self.token_balance = self.token_balance.saturating_add(amount);
    }
}
