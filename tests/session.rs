mod common;

use std::time::Duration;

use common::{advance, harness, harness_with_store, millis};
use fixierun::{
    profile::Profile,
    services::{view::elements, InstallOutcome, MemoryThemeStore, Severity},
    state::{InstallState, PageId, Theme, TokenAmount, WalletStatus},
};

#[tokio::test]
async fn test_claim_rewards_credits_once() {
    let h = harness(Profile::plain());
    let before = h.controller.get_session().unwrap().token_balance;

    let claimed = h.controller.claim_rewards().unwrap();
    assert_eq!(claimed, Some(TokenAmount::from_hundredths(2340)));

    let session = h.controller.get_session().unwrap();
    assert_eq!(
        session.token_balance,
        before.saturating_add(TokenAmount::from_hundredths(2340))
    );
    assert!(!session.claim_available);
    assert_eq!(h.view.text(elements::CLAIM_BUTTON).as_deref(), Some("Claimed"));

    assert_eq!(h.controller.claim_rewards().unwrap(), None);
    assert_eq!(h.controller.get_session().unwrap().token_balance.to_string(), "23.40");
    assert_eq!(
        h.view.last_notification().unwrap().message,
        "Rewards already claimed"
    );
}

#[tokio::test(start_paused = true)]
async fn test_double_connect_schedules_once() {
    let h = harness(Profile::plain());

    let session = h.controller.connect_wallet().unwrap();
    assert_eq!(session.wallet, WalletStatus::Connecting);
    let session = h.controller.connect_wallet().unwrap();
    assert_eq!(session.wallet, WalletStatus::Connecting);

    advance(millis(1_900)).await;
    assert!(!h.controller.get_session().unwrap().wallet_connected());

    advance(millis(200)).await;
    assert!(h.controller.get_session().unwrap().wallet_connected());
    assert_eq!(h.wallet.attempts(), 1);

    let successes = h
        .view
        .notifications()
        .iter()
        .filter(|n| n.severity == Severity::Success)
        .count();
    assert_eq!(successes, 1);

    h.controller.connect_wallet().unwrap();
    advance(Duration::from_secs(5)).await;
    assert_eq!(h.wallet.attempts(), 1);
    assert_eq!(
        h.view.last_notification().unwrap().message,
        "Wallet already connected"
    );
}

#[tokio::test(start_paused = true)]
async fn test_failed_wallet_connection_returns_to_disconnected() {
    let h = harness(Profile::plain());
    h.wallet.set_failing(true);

    h.controller.connect_wallet().unwrap();
    advance(Duration::from_secs(3)).await;

    let session = h.controller.get_session().unwrap();
    assert_eq!(session.wallet, WalletStatus::Disconnected);
    let notice = h.view.last_notification().unwrap();
    assert_eq!(notice.severity, Severity::Error);

    // No retry happens on its own; the user can try again
    h.wallet.set_failing(false);
    h.controller.connect_wallet().unwrap();
    advance(Duration::from_secs(3)).await;
    assert!(h.controller.get_session().unwrap().wallet_connected());
    assert_eq!(h.wallet.attempts(), 2);
}

#[tokio::test]
async fn test_theme_toggle_round_trip_persists() {
    let h = harness_with_store(Profile::plain(), MemoryThemeStore::with_theme(Theme::Dark));
    assert_eq!(h.controller.get_session().unwrap().theme, Theme::Dark);

    let session = h.controller.toggle_theme().unwrap();
    assert_eq!(session.theme, Theme::Light);
    assert_eq!(h.store.stored(), Some(Theme::Light));
    assert_eq!(h.view.snapshot().theme, Some(Theme::Light));

    let session = h.controller.toggle_theme().unwrap();
    assert_eq!(session.theme, Theme::Dark);
    assert_eq!(h.store.stored(), Some(Theme::Dark));
    assert_eq!(h.store.writes(), 2);
}

#[tokio::test]
async fn test_theme_toggle_survives_persistence_failure() {
    let h = harness(Profile::plain());
    h.store.set_fail_writes(true);

    let session = h.controller.toggle_theme().unwrap();
    assert_eq!(session.theme, Theme::Dark);
    assert_eq!(h.view.snapshot().theme, Some(Theme::Dark));
    assert_eq!(h.store.stored(), None);
    assert_eq!(h.view.last_notification().unwrap().message, "Dark mode enabled");
}

#[tokio::test]
async fn test_navigation_soft_failures_leave_state_unchanged() {
    let h = harness(Profile::plain());

    let session = h.controller.navigate("rewards").unwrap();
    assert_eq!(session.current_page, PageId::Rewards);
    assert_eq!(h.view.text(elements::PAGE_TITLE).as_deref(), Some("Rewards"));

    // Unknown id
    let session = h.controller.navigate("leaderboard").unwrap();
    assert_eq!(session.current_page, PageId::Rewards);

    // Known id without a panel in this variant
    let notices = h.view.notifications().len();
    let session = h.controller.navigate("defi").unwrap();
    assert_eq!(session.current_page, PageId::Rewards);
    assert_eq!(h.view.snapshot().active_panel, Some(PageId::Rewards));
    assert_eq!(h.view.notifications().len(), notices);
}

#[tokio::test]
async fn test_cyberpunk_page_hooks_notify() {
    let h = harness(Profile::cyberpunk());
    h.controller.navigate("defi").unwrap();
    assert_eq!(
        h.view.last_notification().unwrap().message,
        "BLOCKCHAIN SYNC IN PROGRESS"
    );
    assert_eq!(h.view.text(elements::PAGE_TITLE).as_deref(), Some("BLOCKCHAIN MATRIX"));

    h.controller.navigate("analytics").unwrap();
    assert_eq!(h.view.snapshot().charts, vec!["neuralChart".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_logout_requires_confirmation_and_resets() {
    let h = harness(Profile::cyberpunk());
    h.controller.claim_rewards().unwrap();
    h.controller.connect_wallet().unwrap();
    advance(Duration::from_secs(3)).await;
    h.controller.navigate("profile").unwrap();

    assert!(!h.controller.logout(false).unwrap());
    let session = h.controller.get_session().unwrap();
    assert!(session.wallet_connected());
    assert_eq!(session.token_balance.to_string(), "1270.40");

    assert!(h.controller.logout(true).unwrap());
    let session = h.controller.get_session().unwrap();
    assert_eq!(session.wallet, WalletStatus::Disconnected);
    assert_eq!(session.token_balance, TokenAmount::whole(1247));
    assert!(session.claim_available);
    assert_eq!(session.current_page, PageId::Home);
}

#[tokio::test(start_paused = true)]
async fn test_reload_discards_pending_tasks() {
    let h = harness(Profile::plain());
    h.controller.connect_wallet().unwrap();
    h.controller.start_workout("cycling").unwrap();
    advance(Duration::from_secs(1)).await;

    h.controller.reload().unwrap();
    assert!(!h.controller.has_active_ticker().unwrap());

    advance(Duration::from_secs(20)).await;
    let session = h.controller.get_session().unwrap();
    assert_eq!(session.wallet, WalletStatus::Disconnected);
    assert!(!session.workout.active);
    assert_eq!(session.token_balance, TokenAmount::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_install_flow() {
    let h = harness(Profile::plain());
    assert_eq!(h.controller.install().await.unwrap(), None);

    h.controller.install_available().unwrap();
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Deferred);

    advance(Duration::from_secs(31)).await;
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Prompting);

    h.controller.dismiss_install().unwrap();
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Deferred);

    let outcome = h.controller.install().await.unwrap();
    assert_eq!(outcome, Some(InstallOutcome::Accepted));
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::NotAvailable);

    h.controller.app_installed().unwrap();
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Installed);
}

#[tokio::test(start_paused = true)]
async fn test_install_prompt_dismissed_by_host() {
    let h = harness(Profile::plain());
    h.install.set_outcome(InstallOutcome::Dismissed);

    h.controller.install_available().unwrap();
    advance(Duration::from_secs(31)).await;
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Prompting);

    let outcome = h.controller.install().await.unwrap();
    assert_eq!(outcome, Some(InstallOutcome::Dismissed));
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::NotAvailable);

    let notice = h.view.last_notification().unwrap();
    assert_eq!(notice.message, "Installation cancelled");
    assert_eq!(notice.severity, Severity::Info);

    // The offer is consumed; asking again does not reach the host
    assert_eq!(h.controller.install().await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn test_install_prompt_skipped_once_installed() {
    let h = harness(Profile::cyberpunk());
    h.controller.install_available().unwrap();
    h.controller.app_installed().unwrap();

    advance(Duration::from_secs(20)).await;
    assert_eq!(h.controller.get_session().unwrap().install, InstallState::Installed);
    assert!(h
        .view
        .notifications()
        .iter()
        .all(|n| n.message != "NEURAL INTERFACE READY FOR INSTALLATION"));
}

#[tokio::test]
async fn test_activate_reveals_main_view() {
    let h = harness(Profile::plain());
    h.controller.activate().unwrap();

    let snapshot = h.view.snapshot();
    assert!(snapshot.main_revealed);
    assert_eq!(snapshot.active_panel, Some(PageId::Home));
    assert_eq!(snapshot.theme, Some(Theme::Light));
    assert_eq!(snapshot.charts, vec!["weeklyChart".to_string()]);
    assert_eq!(h.view.text(elements::TOKEN_AMOUNT).as_deref(), Some("0.00"));
}

#[tokio::test]
async fn test_upgrades_settings_and_connectivity() {
    let h = harness(Profile::cyberpunk());
    assert!(h.controller.acquire_upgrade("NEURAL BOOST").unwrap());
    assert!(!h.controller.acquire_upgrade("NEURAL BOOST").unwrap());
    let session = h.controller.get_session().unwrap();
    assert!(session.acquired_upgrades.contains("NEURAL BOOST"));
    assert_eq!(session.token_balance, TokenAmount::whole(1247));

    h.controller.toggle_setting("HAPTIC FEEDBACK", false);
    assert_eq!(
        h.view.last_notification().unwrap().message,
        "HAPTIC FEEDBACK DISABLED"
    );

    let session = h.controller.set_connectivity(false).unwrap();
    assert!(!session.online);
    assert_eq!(h.view.text(elements::STATUS_TEXT).as_deref(), Some("Offline"));
}

#[tokio::test]
async fn test_session_changes_are_broadcast() {
    let h = harness(Profile::plain());
    let mut rx = h.controller.subscribe();

    h.controller.claim_rewards().unwrap();
    let update = rx.recv().await.unwrap();
    assert_eq!(update.token_balance.to_string(), "23.40");

    let (action, time) = h.controller.get_last_action();
    assert_eq!(action.as_deref(), Some("claim-rewards"));
    assert!(time.is_some());
}
