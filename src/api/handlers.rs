//! HTTP endpoint handlers, one per UI event

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    charts::ChartSpec,
    error::Result,
    services::InstallOutcome,
    state::SessionState,
};
use super::{
    responses::{
        ApiResponse, ConnectivityRequest, HealthResponse, LogoutRequest, SettingRequest,
        StatusResponse,
    },
    ApiContext,
};

type ApiResult = std::result::Result<Json<ApiResponse>, StatusCode>;

fn applied(action: &str, result: Result<SessionState>) -> ApiResult {
    match result {
        Ok(session) => Ok(Json(ApiResponse::applied(action.to_string(), session))),
        Err(e) => {
            error!("Failed to handle {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn current_session(context: &ApiContext) -> std::result::Result<SessionState, StatusCode> {
    context.controller.get_session().map_err(|e| {
        error!("Failed to get session state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle POST /theme/toggle; the preference write runs on the blocking pool
pub async fn toggle_theme_handler(State(context): State<ApiContext>) -> ApiResult {
    let controller = Arc::clone(&context.controller);
    let result = tokio::task::spawn_blocking(move || controller.toggle_theme())
        .await
        .map_err(|e| {
            error!("Theme toggle task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    applied("Theme toggled", result)
}

/// Handle POST /navigate/:page
pub async fn navigate_handler(
    State(context): State<ApiContext>,
    Path(page): Path<String>,
) -> ApiResult {
    let session = context.controller.navigate(&page).map_err(|e| {
        error!("Failed to navigate to {}: {}", page, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if session.current_page.as_str() == page.trim().to_ascii_lowercase() {
        Ok(Json(ApiResponse::applied(format!("Showing {}", page), session)))
    } else {
        Ok(Json(ApiResponse::ignored(format!("No panel for {}", page), session)))
    }
}

/// Handle POST /wallet/connect
pub async fn connect_wallet_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("Wallet connection requested", context.controller.connect_wallet())
}

/// Handle POST /workout - the start/stop button
pub async fn workout_button_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("Workout button pressed", context.controller.request_workout())
}

/// Handle POST /workout/start/:kind
pub async fn start_workout_handler(
    State(context): State<ApiContext>,
    Path(kind): Path<String>,
) -> ApiResult {
    info!("Workout start requested: {}", kind);
    applied("Workout toggled", context.controller.start_workout(&kind))
}

/// Handle POST /workout/stop
pub async fn stop_workout_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("Workout stopped", context.controller.stop_workout())
}

/// Handle POST /rewards/claim
pub async fn claim_rewards_handler(State(context): State<ApiContext>) -> ApiResult {
    match context.controller.claim_rewards() {
        Ok(Some(amount)) => Ok(Json(ApiResponse::applied(
            format!("Claimed {}", amount),
            current_session(&context)?,
        ))),
        Ok(None) => Ok(Json(ApiResponse::ignored(
            "Rewards already claimed".to_string(),
            current_session(&context)?,
        ))),
        Err(e) => {
            error!("Failed to claim rewards: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /upgrades/:name
pub async fn acquire_upgrade_handler(
    State(context): State<ApiContext>,
    Path(name): Path<String>,
) -> ApiResult {
    match context.controller.acquire_upgrade(&name) {
        Ok(true) => Ok(Json(ApiResponse::applied(
            format!("{} acquired", name),
            current_session(&context)?,
        ))),
        Ok(false) => Ok(Json(ApiResponse::ignored(
            format!("{} already acquired", name),
            current_session(&context)?,
        ))),
        Err(e) => {
            error!("Failed to acquire upgrade {}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /settings/:name
pub async fn toggle_setting_handler(
    State(context): State<ApiContext>,
    Path(name): Path<String>,
    Json(request): Json<SettingRequest>,
) -> ApiResult {
    context.controller.toggle_setting(&name, request.enabled);
    Ok(Json(ApiResponse::applied(
        format!("{} set to {}", name, request.enabled),
        current_session(&context)?,
    )))
}

/// Handle POST /connectivity
pub async fn connectivity_handler(
    State(context): State<ApiContext>,
    Json(request): Json<ConnectivityRequest>,
) -> ApiResult {
    applied(
        if request.online { "Online" } else { "Offline" },
        context.controller.set_connectivity(request.online),
    )
}

/// Handle POST /install/available
pub async fn install_available_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("Install offer deferred", context.controller.install_available())
}

/// Handle POST /install/accept
pub async fn install_accept_handler(State(context): State<ApiContext>) -> ApiResult {
    match context.controller.install().await {
        Ok(Some(InstallOutcome::Accepted)) => Ok(Json(ApiResponse::applied(
            "Installation started".to_string(),
            current_session(&context)?,
        ))),
        Ok(Some(InstallOutcome::Dismissed)) => Ok(Json(ApiResponse::ignored(
            "Installation cancelled".to_string(),
            current_session(&context)?,
        ))),
        Ok(None) => Ok(Json(ApiResponse::ignored(
            "No install offer pending".to_string(),
            current_session(&context)?,
        ))),
        Err(e) => {
            error!("Install request failed: {}", e);
            Ok(Json(ApiResponse::error(e.to_string(), current_session(&context)?)))
        }
    }
}

/// Handle POST /install/dismiss
pub async fn install_dismiss_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("Install prompt dismissed", context.controller.dismiss_install())
}

/// Handle POST /install/installed
pub async fn app_installed_handler(State(context): State<ApiContext>) -> ApiResult {
    applied("App installed", context.controller.app_installed())
}

/// Handle POST /logout
pub async fn logout_handler(
    State(context): State<ApiContext>,
    Json(request): Json<LogoutRequest>,
) -> ApiResult {
    match context.controller.logout(request.confirmed) {
        Ok(true) => Ok(Json(ApiResponse::applied(
            "Session reset".to_string(),
            current_session(&context)?,
        ))),
        Ok(false) => Ok(Json(ApiResponse::ignored(
            "Logout not confirmed".to_string(),
            current_session(&context)?,
        ))),
        Err(e) => {
            error!("Failed to log out: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - session, rendered view and metadata
pub async fn status_handler(
    State(context): State<ApiContext>,
) -> std::result::Result<Json<StatusResponse>, StatusCode> {
    let session = current_session(&context)?;

    let ticker_active = match context.controller.has_active_ticker() {
        Ok(active) => active,
        Err(e) => {
            error!("Failed to read ticker state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = context.controller.get_last_action();

    Ok(Json(StatusResponse {
        profile: context.controller.profile.name.clone(),
        session,
        view: context.view.snapshot(),
        ticker_active,
        uptime: context.controller.get_uptime(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /charts
pub async fn charts_handler(State(context): State<ApiContext>) -> Json<Vec<ChartSpec>> {
    Json(context.controller.profile.charts.clone())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
