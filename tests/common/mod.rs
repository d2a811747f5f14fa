#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use fixierun::{
    profile::Profile,
    services::{HeadlessView, MemoryThemeStore, ScriptedInstallHost, SimulatedWallet},
    state::{Capabilities, Controller, Theme},
};

pub struct Harness {
    pub controller: Arc<Controller>,
    pub view: Arc<HeadlessView>,
    pub store: Arc<MemoryThemeStore>,
    pub wallet: Arc<SimulatedWallet>,
    pub install: Arc<ScriptedInstallHost>,
}

pub fn harness(profile: Profile) -> Harness {
    harness_with_store(profile, MemoryThemeStore::new())
}

pub fn harness_with_store(profile: Profile, store: MemoryThemeStore) -> Harness {
    let view = Arc::new(HeadlessView::new(profile.panels.clone()));
    let store = Arc::new(store);
    let wallet = Arc::new(SimulatedWallet::new(profile.wallet_delay));
    let install = Arc::new(ScriptedInstallHost::default());

    let mut capabilities = Capabilities::simulated(&profile, view.clone(), store.clone());
    capabilities.wallet = wallet.clone();
    capabilities.install = install.clone();

    let controller = Arc::new(Controller::with_system_theme(profile, capabilities, Theme::Light));
    Harness {
        controller,
        view,
        store,
        wallet,
        install,
    }
}

/// Let paused time run forward, firing every timer due on the way
pub async fn advance(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
