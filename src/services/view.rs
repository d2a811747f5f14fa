//! View collaborator: the surface the controller renders into

use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    charts::ChartSpec,
    error::Result,
    state::{PageId, Theme},
};

/// Element ids the controller writes text into
pub mod elements {
    pub const PAGE_TITLE: &str = "page-title";
    pub const TOKEN_AMOUNT: &str = "token-amount";
    pub const EARNINGS_AMOUNT: &str = "earnings-amount";
    pub const GPS_SPEED: &str = "gps-speed";
    pub const GPS_DISTANCE: &str = "gps-distance";
    pub const GPS_TIME: &str = "gps-time";
    pub const WORKOUT_BUTTON: &str = "start-workout";
    pub const CONNECT_BUTTON: &str = "connect-btn";
    pub const CLAIM_BUTTON: &str = "claim-btn";
    pub const STATUS_TEXT: &str = "status-text";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Transient notice shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

/// Rendering calls the controller makes. Implementations own the markup;
/// the controller never inspects it beyond `has_panel`.
pub trait View: Send + Sync {
    fn has_panel(&self, page: PageId) -> bool;
    fn show_panel(&self, page: PageId);
    fn set_text(&self, element: &str, text: &str);
    fn notify(&self, message: &str, severity: Severity);
    fn apply_theme(&self, theme: Theme);
    fn render_chart(&self, chart: &ChartSpec) -> Result<()>;
    /// Show the main view, skipping the loading screen
    fn reveal_main(&self);
}

/// Everything a [`HeadlessView`] has been asked to display
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub main_revealed: bool,
    pub active_panel: Option<PageId>,
    pub theme: Option<Theme>,
    pub texts: BTreeMap<String, String>,
    pub notifications: VecDeque<Notification>,
    pub charts: Vec<String>,
}

/// In-memory view that records every call, used behind the HTTP surface
#[derive(Debug)]
pub struct HeadlessView {
    panels: Vec<PageId>,
    history_limit: usize,
    snapshot: Mutex<ViewSnapshot>,
}

impl HeadlessView {
    pub const DEFAULT_HISTORY: usize = 50;

    /// Create a view exposing the given panels
    pub fn new(panels: Vec<PageId>) -> Self {
        Self::with_history(panels, Self::DEFAULT_HISTORY)
    }

    pub fn with_history(panels: Vec<PageId>, history_limit: usize) -> Self {
        Self {
            panels,
            history_limit: history_limit.max(1),
            snapshot: Mutex::new(ViewSnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn text(&self, element: &str) -> Option<String> {
        self.snapshot
            .lock()
            .ok()
            .and_then(|s| s.texts.get(element).cloned())
    }

    pub fn last_notification(&self) -> Option<Notification> {
        self.snapshot
            .lock()
            .ok()
            .and_then(|s| s.notifications.back().cloned())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.snapshot
            .lock()
            .map(|s| s.notifications.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn with_snapshot<F>(&self, updater: F)
    where
        F: FnOnce(&mut ViewSnapshot),
    {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            updater(&mut snapshot);
        }
    }
}

impl View for HeadlessView {
    fn has_panel(&self, page: PageId) -> bool {
        self.panels.contains(&page)
    }

    fn show_panel(&self, page: PageId) {
        debug!("Showing panel {}", page.panel_id());
        self.with_snapshot(|s| s.active_panel = Some(page));
    }

    fn set_text(&self, element: &str, text: &str) {
        self.with_snapshot(|s| {
            s.texts.insert(element.to_string(), text.to_string());
        });
    }

    fn notify(&self, message: &str, severity: Severity) {
        info!("Notice ({:?}): {}", severity, message);
        let limit = self.history_limit;
        self.with_snapshot(|s| {
            s.notifications.push_back(Notification {
                message: message.to_string(),
                severity,
                timestamp: Utc::now(),
            });
            while s.notifications.len() > limit {
                s.notifications.pop_front();
            }
        });
    }

    fn apply_theme(&self, theme: Theme) {
        self.with_snapshot(|s| s.theme = Some(theme));
    }

    fn render_chart(&self, chart: &ChartSpec) -> Result<()> {
        debug!("Rendering chart {} with {} series", chart.id, chart.series.len());
        self.with_snapshot(|s| {
            if !s.charts.contains(&chart.id) {
                s.charts.push(chart.id.clone());
            }
        });
        Ok(())
    }

    fn reveal_main(&self) {
        self.with_snapshot(|s| s.main_revealed = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_history_is_bounded() {
        let view = HeadlessView::with_history(vec![PageId::Home], 2);
        view.notify("one", Severity::Info);
        view.notify("two", Severity::Success);
        view.notify("three", Severity::Error);

        let messages: Vec<String> = view.notifications().into_iter().map(|n| n.message).collect();
        assert_eq!(messages, vec!["two".to_string(), "three".to_string()]);
        assert_eq!(view.last_notification().map(|n| n.severity), Some(Severity::Error));
    }

    #[test]
    fn test_panels_and_texts() {
        let view = HeadlessView::new(vec![PageId::Home, PageId::Workouts]);
        assert!(view.has_panel(PageId::Workouts));
        assert!(!view.has_panel(PageId::Defi));

        view.show_panel(PageId::Workouts);
        view.set_text(elements::PAGE_TITLE, "Workouts");
        let snapshot = view.snapshot();
        assert_eq!(snapshot.active_panel, Some(PageId::Workouts));
        assert_eq!(view.text(elements::PAGE_TITLE).as_deref(), Some("Workouts"));
        assert!(!snapshot.main_revealed);
    }
}
