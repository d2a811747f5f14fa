//! Session controller: turns UI events into session state changes

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::{
    sync::{broadcast, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use super::{InstallState, PageId, SessionState, Theme, TokenAmount, WalletStatus, WorkoutState};
use crate::{
    error::{ControllerError, Result},
    profile::{fill, Profile},
    services::{
        preferences::{resolve_theme, system_theme},
        view::elements,
        InstallHost, InstallOutcome, ScriptedInstallHost, Severity, SimulatedSensor,
        SimulatedWallet, ThemeStore, View, WalletClient, WorkoutSensor,
    },
    tasks::{
        install_prompt_task, wallet_connect_task, workout_auto_complete_task,
        workout_return_home_task, workout_ticker_task,
    },
};

/// Collaborators injected into the controller
#[derive(Clone)]
pub struct Capabilities {
    pub view: Arc<dyn View>,
    pub store: Arc<dyn ThemeStore>,
    pub sensor: Arc<dyn WorkoutSensor>,
    pub wallet: Arc<dyn WalletClient>,
    pub install: Arc<dyn InstallHost>,
}

impl Capabilities {
    /// Simulated sensor, wallet and install host tuned by the profile
    pub fn simulated(profile: &Profile, view: Arc<dyn View>, store: Arc<dyn ThemeStore>) -> Self {
        Self {
            view,
            store,
            sensor: Arc::new(SimulatedSensor::new(
                profile.distance_km_per_second,
                profile.speed_kmh,
            )),
            wallet: Arc::new(SimulatedWallet::new(profile.wallet_delay)),
            install: Arc::new(ScriptedInstallHost::default()),
        }
    }
}

/// Session state plus the bookkeeping that must change atomically with it
#[derive(Debug)]
struct Shared {
    session: SessionState,
    /// Held exactly while `session.workout.active` is true
    ticker: Option<JoinHandle<()>>,
    /// Bumped by every reload; delayed tasks from older sessions are ignored
    session_generation: u64,
    /// Bumped by every workout start and stop
    workout_generation: u64,
}

impl Shared {
    /// Cancel the ticker and mark the workout idle. Returns false if already idle.
    fn halt_workout(&mut self) -> bool {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        if !self.session.workout.active {
            return false;
        }
        self.session.workout.active = false;
        self.workout_generation += 1;
        true
    }
}

/// Owns the session and reacts to UI events
pub struct Controller {
    pub profile: Profile,
    shared: Mutex<Shared>,
    system_theme: Theme,
    view: Arc<dyn View>,
    store: Arc<dyn ThemeStore>,
    sensor: Arc<dyn WorkoutSensor>,
    wallet: Arc<dyn WalletClient>,
    install: Arc<dyn InstallHost>,
    pub start_time: Instant,
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
    /// Channel for session change notifications
    pub state_change_tx: broadcast::Sender<SessionState>,
    /// Channel for workout progress updates
    pub workout_update_tx: watch::Sender<WorkoutState>,
    /// Keep the receiver alive to prevent channel closure
    _workout_update_rx: watch::Receiver<WorkoutState>,
}

impl Controller {
    /// Create a controller, falling back to the host colour scheme when no theme is stored
    pub fn new(profile: Profile, capabilities: Capabilities) -> Self {
        Self::with_system_theme(profile, capabilities, system_theme())
    }

    pub fn with_system_theme(profile: Profile, capabilities: Capabilities, system_theme: Theme) -> Self {
        let theme = resolve_theme(capabilities.store.as_ref(), system_theme);
        let session = SessionState::new(&profile, theme);
        let (state_change_tx, _) = broadcast::channel(100);
        let (workout_update_tx, workout_update_rx) = watch::channel(WorkoutState::new());

        info!("Session created for profile {} with {} theme", profile.name, theme);

        Self {
            profile,
            shared: Mutex::new(Shared {
                session,
                ticker: None,
                session_generation: 0,
                workout_generation: 0,
            }),
            system_theme,
            view: capabilities.view,
            store: capabilities.store,
            sensor: capabilities.sensor,
            wallet: capabilities.wallet,
            install: capabilities.install,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            state_change_tx,
            workout_update_tx,
            _workout_update_rx: workout_update_rx,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Shared>> {
        self.shared
            .lock()
            .map_err(|_| ControllerError::LockPoisoned("session state"))
    }

    /// Apply an update under the lock, then record the action and notify listeners
    fn update<F, R>(&self, action: &str, updater: F) -> Result<(SessionState, R)>
    where
        F: FnOnce(&mut Shared) -> R,
    {
        let mut shared = self.lock()?;
        let outcome = updater(&mut *shared);
        let snapshot = shared.session.clone();
        drop(shared); // Release the lock before touching the view or channels

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }

        if let Err(e) = self.state_change_tx.send(snapshot.clone()) {
            debug!("No session listeners for {}: {}", action, e);
        }

        Ok((snapshot, outcome))
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.view.notify(message, severity);
    }

    fn refresh_balances(&self, session: &SessionState) {
        self.view
            .set_text(elements::TOKEN_AMOUNT, &session.token_balance.to_string());
        self.view
            .set_text(elements::EARNINGS_AMOUNT, &session.total_earned.to_string());
    }

    fn refresh_workout(&self, workout: &WorkoutState) {
        self.view.set_text(elements::GPS_TIME, &workout.elapsed_display());
        self.view.set_text(elements::GPS_DISTANCE, &workout.distance_display());
        self.view.set_text(elements::GPS_SPEED, &workout.speed_display());
    }

    fn refresh_workout_button(&self, active: bool) {
        let label = if active {
            &self.profile.messages.workout_button_stop
        } else {
            &self.profile.messages.workout_button_start
        };
        self.view.set_text(elements::WORKOUT_BUTTON, label);
    }

    /// Initial activation: theme, main view, home page, charts
    pub fn activate(&self) -> Result<()> {
        let session = self.get_session()?;
        self.view.apply_theme(session.theme);
        self.view.reveal_main();
        self.show_page(session.current_page)?;
        self.refresh_balances(&session);
        self.refresh_workout_button(session.workout.active);

        for chart in &self.profile.charts {
            self.view.render_chart(chart)?;
        }

        info!("Interface activated ({} charts)", self.profile.charts.len());
        Ok(())
    }

    /// Flip the theme and persist it; a failed write never blocks the change
    pub fn toggle_theme(&self) -> Result<SessionState> {
        let (session, theme) = self.update("toggle-theme", |shared| {
            shared.session.theme = shared.session.theme.toggled();
            shared.session.theme
        })?;

        self.view.apply_theme(theme);
        if let Err(e) = self.store.save(theme) {
            warn!("Cannot save theme preference: {}", e);
        }

        let messages = &self.profile.messages;
        let mode = match theme {
            Theme::Dark => &messages.dark_label,
            Theme::Light => &messages.light_label,
        };
        self.notify(&fill(&messages.theme_changed, &[("mode", mode.as_str())]), Severity::Success);
        info!("Theme set to {}", theme);
        Ok(session)
    }

    /// Switch to a page. Unknown pages and missing panels are logged and ignored.
    pub fn navigate(&self, page_id: &str) -> Result<SessionState> {
        let page = match page_id.parse::<PageId>() {
            Ok(page) => page,
            Err(e) => {
                warn!("Navigation skipped: {}", e);
                return self.get_session();
            }
        };
        self.show_page(page)
    }

    fn show_page(&self, page: PageId) -> Result<SessionState> {
        if !self.view.has_panel(page) {
            warn!("Navigation skipped: {}", ControllerError::MissingPanel(page.panel_id()));
            return self.get_session();
        }

        let (session, _) = self.update("navigate", |shared| {
            shared.session.current_page = page;
        })?;

        self.view.show_panel(page);
        self.view
            .set_text(elements::PAGE_TITLE, self.profile.page_title(page));
        self.run_page_hook(page, &session)?;

        debug!("Navigated to {}", page);
        Ok(session)
    }

    fn run_page_hook(&self, page: PageId, session: &SessionState) -> Result<()> {
        match page {
            PageId::Home => self.refresh_balances(session),
            PageId::Analytics => {
                for chart in &self.profile.charts {
                    self.view.render_chart(chart)?;
                }
            }
            _ => {}
        }

        if let Some(notice) = self.profile.page_notices.get(&page) {
            self.notify(notice, Severity::Info);
        }
        Ok(())
    }

    /// Start the wallet link unless one is established or underway
    pub fn connect_wallet(self: &Arc<Self>) -> Result<SessionState> {
        let (session, scheduled) = self.update("connect-wallet", |shared| {
            match shared.session.wallet {
                WalletStatus::Connected | WalletStatus::Connecting => None,
                WalletStatus::Disconnected => {
                    shared.session.wallet = WalletStatus::Connecting;
                    Some(shared.session_generation)
                }
            }
        })?;

        let messages = &self.profile.messages;
        match scheduled {
            Some(generation) => {
                info!("Wallet connection scheduled");
                tokio::spawn(wallet_connect_task(Arc::clone(self), generation));
                self.view
                    .set_text(elements::CONNECT_BUTTON, &messages.wallet_connecting);
                self.notify(&messages.wallet_connecting, Severity::Info);
            }
            None if session.wallet_connected() => {
                self.notify(&messages.wallet_already_connected, Severity::Info);
            }
            None => {
                debug!("Wallet connection already in progress");
                self.notify(&messages.wallet_connecting, Severity::Info);
            }
        }
        Ok(session)
    }

    /// Apply the outcome of a wallet handshake scheduled under `generation`
    pub fn finish_wallet_connect(&self, generation: u64, result: Result<()>) -> Result<bool> {
        let succeeded = result.is_ok();
        let (_, applied) = self.update("wallet-connected", |shared| {
            if shared.session_generation != generation
                || shared.session.wallet != WalletStatus::Connecting
            {
                return false;
            }
            shared.session.wallet = if succeeded {
                WalletStatus::Connected
            } else {
                WalletStatus::Disconnected
            };
            true
        })?;

        if !applied {
            debug!("Discarding stale wallet connection result");
            return Ok(false);
        }

        let messages = &self.profile.messages;
        match result {
            Ok(()) => {
                info!("Wallet connected");
                self.view
                    .set_text(elements::CONNECT_BUTTON, &messages.connect_button_connected);
                self.notify(&messages.wallet_connected, Severity::Success);
            }
            Err(e) => {
                warn!("{}", e);
                self.notify(&messages.wallet_failed, Severity::Error);
            }
        }
        Ok(true)
    }

    /// Start button: stop a running workout, otherwise offer the workout types
    pub fn request_workout(&self) -> Result<SessionState> {
        if self.get_session()?.workout.active {
            return self.stop_workout();
        }
        self.notify(&self.profile.messages.select_workout, Severity::Info);
        self.show_page(PageId::Workouts)
    }

    /// Start a workout, or stop the running one
    pub fn start_workout(self: &Arc<Self>, kind: &str) -> Result<SessionState> {
        let (session, started) = self.update("start-workout", |shared| {
            if shared.session.workout.active {
                return None;
            }
            // A leftover ticker must never outlive the workout it belonged to
            shared.halt_workout();
            shared.session.workout = WorkoutState::started(kind);
            shared.workout_generation += 1;
            let generation = shared.workout_generation;
            shared.ticker = Some(tokio::spawn(workout_ticker_task(Arc::clone(self), generation)));
            Some(generation)
        })?;

        let Some(generation) = started else {
            debug!("Workout already active, treating start as stop");
            return self.stop_workout();
        };

        tokio::spawn(workout_auto_complete_task(
            Arc::clone(self),
            kind.to_string(),
            generation,
        ));
        if self.profile.return_home_delay.is_some() {
            tokio::spawn(workout_return_home_task(Arc::clone(self), generation));
        }

        info!("Workout {} started (generation {})", kind, generation);
        if let Err(e) = self.workout_update_tx.send(session.workout.clone()) {
            debug!("No workout listeners: {}", e);
        }
        self.refresh_workout(&session.workout);
        self.refresh_workout_button(true);
        let label = self.profile.workout_label(kind);
        self.notify(
            &fill(&self.profile.messages.workout_started, &[("workout", label.as_str())]),
            Severity::Success,
        );
        Ok(session)
    }

    /// Cancel the running workout; does nothing when idle
    pub fn stop_workout(&self) -> Result<SessionState> {
        let (session, stopped) = self.update("stop-workout", Shared::halt_workout)?;

        if stopped {
            info!("Workout stopped");
            if let Err(e) = self.workout_update_tx.send(session.workout.clone()) {
                debug!("No workout listeners: {}", e);
            }
            self.refresh_workout_button(false);
            self.notify(&self.profile.messages.workout_stopped, Severity::Info);
        }
        Ok(session)
    }

    /// Show the home page while the workout started under `generation` is running
    pub fn return_home(&self, generation: u64) -> Result<bool> {
        let current = {
            let shared = self.lock()?;
            shared.session.workout.active && shared.workout_generation == generation
        };
        if !current {
            return Ok(false);
        }

        self.show_page(PageId::Home)?;
        self.refresh_workout_button(true);
        Ok(true)
    }

    /// Advance the workout by one tick if `generation` is still current
    pub fn record_tick(&self, generation: u64) -> Result<Option<WorkoutState>> {
        let mut shared = self.lock()?;
        if !shared.session.workout.active || shared.workout_generation != generation {
            return Ok(None);
        }

        let workout = &mut shared.session.workout;
        workout.elapsed_seconds += 1;
        workout.distance_km = self.sensor.distance_km(workout.elapsed_seconds);
        workout.speed_kmh = self.sensor.speed_kmh(workout.elapsed_seconds);
        let progress = workout.clone();
        drop(shared);

        self.refresh_workout(&progress);
        if let Err(e) = self.workout_update_tx.send(progress.clone()) {
            debug!("No workout listeners: {}", e);
        }
        Ok(Some(progress))
    }

    /// Complete the active workout and credit its reward; no-op when idle
    pub fn complete_workout(&self, kind: &str) -> Result<Option<TokenAmount>> {
        self.finish_workout(kind, None)
    }

    /// Completion fired by a timer; also ignored if a newer workout replaced it
    pub fn complete_scheduled_workout(&self, kind: &str, generation: u64) -> Result<Option<TokenAmount>> {
        self.finish_workout(kind, Some(generation))
    }

    fn finish_workout(&self, kind: &str, generation: Option<u64>) -> Result<Option<TokenAmount>> {
        let reward = self.profile.reward_for(kind);
        let (session, completed) = self.update("complete-workout", |shared| {
            let stale = generation.is_some_and(|g| g != shared.workout_generation);
            if !shared.session.workout.active || stale {
                return false;
            }
            shared.halt_workout();
            shared.session.credit(reward);
            shared.session.total_earned = shared.session.total_earned.saturating_add(reward);
            true
        })?;

        if !completed {
            debug!("Ignoring completion of {}: no matching active workout", kind);
            return Ok(None);
        }

        info!("Workout {} completed, +{}", kind, reward);
        if let Err(e) = self.workout_update_tx.send(session.workout.clone()) {
            debug!("No workout listeners: {}", e);
        }
        self.refresh_workout_button(false);
        self.refresh_balances(&session);
        let label = self.profile.workout_label(kind);
        let reward_text = reward.to_string();
        self.notify(
            &fill(
                &self.profile.messages.workout_completed,
                &[("workout", label.as_str()), ("reward", reward_text.as_str())],
            ),
            Severity::Success,
        );
        Ok(Some(reward))
    }

    /// Credit the claim amount once per view session
    pub fn claim_rewards(&self) -> Result<Option<TokenAmount>> {
        let amount = self.profile.claim_amount;
        let (session, claimed) = self.update("claim-rewards", |shared| {
            if !shared.session.claim_available {
                return false;
            }
            shared.session.claim_available = false;
            shared.session.credit(amount);
            true
        })?;

        let messages = &self.profile.messages;
        if !claimed {
            self.notify(&messages.claim_unavailable, Severity::Info);
            return Ok(None);
        }

        info!("Rewards claimed: +{}", amount);
        self.refresh_balances(&session);
        self.view
            .set_text(elements::CLAIM_BUTTON, &messages.claim_button_claimed);
        let amount_text = amount.to_string();
        self.notify(
            &fill(&messages.claim_succeeded, &[("amount", amount_text.as_str())]),
            Severity::Success,
        );
        Ok(Some(amount))
    }

    /// Mark a marketplace upgrade acquired for this session
    pub fn acquire_upgrade(&self, name: &str) -> Result<bool> {
        let (_, acquired) = self.update("acquire-upgrade", |shared| {
            shared.session.acquired_upgrades.insert(name.to_string())
        })?;

        let messages = &self.profile.messages;
        let template = if acquired {
            &messages.upgrade_acquired
        } else {
            &messages.upgrade_already_acquired
        };
        let severity = if acquired { Severity::Success } else { Severity::Info };
        self.notify(&fill(template, &[("upgrade", name)]), severity);
        Ok(acquired)
    }

    /// Settings switches only echo their new state
    pub fn toggle_setting(&self, name: &str, enabled: bool) {
        let messages = &self.profile.messages;
        let state = if enabled {
            &messages.enabled_label
        } else {
            &messages.disabled_label
        };
        debug!("Setting {} -> {}", name, enabled);
        self.notify(
            &fill(&messages.setting_toggled, &[("setting", name), ("state", state.as_str())]),
            Severity::Info,
        );
    }

    pub fn set_connectivity(&self, online: bool) -> Result<SessionState> {
        let (session, _) = self.update(if online { "online" } else { "offline" }, |shared| {
            shared.session.online = online;
        })?;

        let messages = &self.profile.messages;
        self.view
            .set_text(elements::STATUS_TEXT, if online { "Online" } else { "Offline" });
        if online {
            self.notify(&messages.online, Severity::Success);
        } else {
            self.notify(&messages.offline, Severity::Info);
        }
        Ok(session)
    }

    /// Host reports the app as installable; the prompt is shown after a delay
    pub fn install_available(self: &Arc<Self>) -> Result<SessionState> {
        let (session, scheduled) = self.update("install-available", |shared| {
            if shared.session.install == InstallState::Installed {
                return None;
            }
            shared.session.install = InstallState::Deferred;
            Some(shared.session_generation)
        })?;

        if let Some(generation) = scheduled {
            debug!("Install prompt deferred for {:?}", self.profile.install_prompt_delay);
            tokio::spawn(install_prompt_task(Arc::clone(self), generation));
        }
        Ok(session)
    }

    /// Show the install prompt if the offer is still deferred in this session
    pub fn reveal_install_prompt(&self, generation: u64) -> Result<bool> {
        let (_, revealed) = self.update("install-prompt", |shared| {
            if shared.session_generation != generation
                || shared.session.install != InstallState::Deferred
            {
                return false;
            }
            shared.session.install = InstallState::Prompting;
            true
        })?;

        if revealed {
            self.notify(&self.profile.messages.install_ready, Severity::Info);
        }
        Ok(revealed)
    }

    /// Ask the host to install. The deferred offer is consumed whatever the answer.
    pub async fn install(&self) -> Result<Option<InstallOutcome>> {
        let pending = matches!(
            self.get_session()?.install,
            InstallState::Deferred | InstallState::Prompting
        );
        if !pending {
            debug!("Install requested without a deferred offer");
            return Ok(None);
        }

        let outcome = self.install.prompt().await?;
        self.update("install", |shared| {
            if shared.session.install != InstallState::Installed {
                shared.session.install = InstallState::NotAvailable;
            }
        })?;

        let messages = &self.profile.messages;
        match outcome {
            InstallOutcome::Accepted => self.notify(&messages.install_accepted, Severity::Success),
            InstallOutcome::Dismissed => self.notify(&messages.install_cancelled, Severity::Info),
        }
        info!("Install prompt answered: {:?}", outcome);
        Ok(Some(outcome))
    }

    /// Hide the prompt but keep the offer for later
    pub fn dismiss_install(&self) -> Result<SessionState> {
        let (session, _) = self.update("install-dismiss", |shared| {
            if shared.session.install == InstallState::Prompting {
                shared.session.install = InstallState::Deferred;
            }
        })?;
        self.notify(&self.profile.messages.install_deferred, Severity::Info);
        Ok(session)
    }

    pub fn app_installed(&self) -> Result<SessionState> {
        let (session, _) = self.update("app-installed", |shared| {
            shared.session.install = InstallState::Installed;
        })?;
        info!("App installed");
        self.notify(&self.profile.messages.installed, Severity::Success);
        Ok(session)
    }

    /// Log out after confirmation. Returns whether the session was reset.
    pub fn logout(&self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            info!("Logout cancelled");
            return Ok(false);
        }

        self.notify(&self.profile.messages.logging_out, Severity::Info);
        let initial_balance = self.profile.initial_balance;
        self.update("logout", |shared| {
            shared.session.wallet = WalletStatus::Disconnected;
            shared.session.token_balance = initial_balance;
        })?;
        self.reload()?;
        Ok(true)
    }

    /// Discard the session and start over from profile defaults
    pub fn reload(&self) -> Result<SessionState> {
        let theme = resolve_theme(self.store.as_ref(), self.system_theme);
        let (session, generation) = self.update("reload", |shared| {
            shared.halt_workout();
            shared.session_generation += 1;
            shared.session = SessionState::new(&self.profile, theme);
            shared.session_generation
        })?;

        info!("Session reloaded (generation {})", generation);
        if let Err(e) = self.workout_update_tx.send(session.workout.clone()) {
            debug!("No workout listeners: {}", e);
        }
        self.view.apply_theme(session.theme);
        self.view.show_panel(session.current_page);
        self.view
            .set_text(elements::PAGE_TITLE, self.profile.page_title(session.current_page));
        self.refresh_balances(&session);
        self.refresh_workout(&session.workout);
        self.refresh_workout_button(false);
        Ok(session)
    }

    /// Get current session state
    pub fn get_session(&self) -> Result<SessionState> {
        self.lock().map(|shared| shared.session.clone())
    }

    /// Whether a workout ticker task is currently held
    pub fn has_active_ticker(&self) -> Result<bool> {
        self.lock().map(|shared| shared.ticker.is_some())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionState> {
        self.state_change_tx.subscribe()
    }

    pub fn workout_updates(&self) -> watch::Receiver<WorkoutState> {
        self.workout_update_tx.subscribe()
    }

    pub fn view(&self) -> Arc<dyn View> {
        Arc::clone(&self.view)
    }

    pub fn wallet(&self) -> Arc<dyn WalletClient> {
        Arc::clone(&self.wallet)
    }

    /// Calculate controller uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("profile", &self.profile.name)
            .field("system_theme", &self.system_theme)
            .finish_non_exhaustive()
    }
}
