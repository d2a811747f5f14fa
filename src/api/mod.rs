//! HTTP API module
//!
//! Each endpoint delivers one UI event to the controller.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{services::HeadlessView, state::Controller};
use handlers::*;

/// Shared handler state: the controller and the view it renders into
#[derive(Clone)]
pub struct ApiContext {
    pub controller: Arc<Controller>,
    pub view: Arc<HeadlessView>,
}

impl ApiContext {
    pub fn new(controller: Arc<Controller>, view: Arc<HeadlessView>) -> Self {
        Self { controller, view }
    }
}

/// Create the HTTP router with all endpoints
pub fn create_router(context: ApiContext) -> Router {
    Router::new()
        .route("/theme/toggle", post(toggle_theme_handler))
        .route("/navigate/:page", post(navigate_handler))
        .route("/wallet/connect", post(connect_wallet_handler))
        .route("/workout", post(workout_button_handler))
        .route("/workout/start/:kind", post(start_workout_handler))
        .route("/workout/stop", post(stop_workout_handler))
        .route("/rewards/claim", post(claim_rewards_handler))
        .route("/upgrades/:name", post(acquire_upgrade_handler))
        .route("/settings/:name", post(toggle_setting_handler))
        .route("/connectivity", post(connectivity_handler))
        .route("/install/available", post(install_available_handler))
        .route("/install/accept", post(install_accept_handler))
        .route("/install/dismiss", post(install_dismiss_handler))
        .route("/install/installed", post(app_installed_handler))
        .route("/logout", post(logout_handler))
        .route("/status", get(status_handler))
        .route("/charts", get(charts_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}
