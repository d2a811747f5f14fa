mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use common::harness;
use fixierun::{api::ApiContext, create_router, profile::Profile, services::InstallOutcome};

fn router(profile: Profile) -> Router {
    let h = harness(profile);
    create_router(ApiContext::new(h.controller, h.view))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = router(Profile::plain());
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_claim_endpoint_applies_once() {
    let app = router(Profile::plain());

    let (status, body) = send(&app, Method::POST, "/rewards/claim", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    assert_eq!(body["session"]["token_balance"], "23.40");

    let (_, body) = send(&app, Method::POST, "/rewards/claim", None).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["session"]["token_balance"], "23.40");
}

#[tokio::test]
async fn test_navigate_endpoint_reports_missing_panels() {
    let app = router(Profile::plain());

    let (_, body) = send(&app, Method::POST, "/navigate/wallet", None).await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["session"]["current_page"], "wallet");

    let (status, body) = send(&app, Method::POST, "/navigate/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["session"]["current_page"], "wallet");
}

#[tokio::test]
async fn test_workout_and_status_endpoints() {
    let app = router(Profile::plain());

    let (_, body) = send(&app, Method::POST, "/workout/start/running", None).await;
    assert_eq!(body["session"]["workout"]["active"], true);

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"], "plain");
    assert_eq!(body["ticker_active"], true);
    assert_eq!(body["last_action"], "start-workout");

    let (_, body) = send(&app, Method::POST, "/workout/stop", None).await;
    assert_eq!(body["session"]["workout"]["active"], false);

    let (_, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(body["ticker_active"], false);
    let notices = body["view"]["notifications"].as_array().unwrap();
    assert_eq!(notices.last().unwrap()["message"], "Workout stopped");
}

#[tokio::test]
async fn test_logout_endpoint_needs_confirmation() {
    let app = router(Profile::cyberpunk());
    send(&app, Method::POST, "/rewards/claim", None).await;

    let (_, body) = send(&app, Method::POST, "/logout", Some(r#"{"confirmed": false}"#)).await;
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["session"]["token_balance"], "1270.40");

    let (_, body) = send(&app, Method::POST, "/logout", Some(r#"{"confirmed": true}"#)).await;
    assert_eq!(body["status"], "applied");
    assert_eq!(body["session"]["token_balance"], "1247.00");
    assert_eq!(body["session"]["claim_available"], true);
}

#[tokio::test]
async fn test_settings_and_connectivity_endpoints() {
    let app = router(Profile::plain());

    let (status, body) = send(
        &app,
        Method::POST,
        "/settings/notifications",
        Some(r#"{"enabled": true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");

    let (_, body) = send(&app, Method::POST, "/connectivity", Some(r#"{"online": false}"#)).await;
    assert_eq!(body["session"]["online"], false);
}

#[tokio::test]
async fn test_charts_endpoint() {
    let app = router(Profile::cyberpunk());
    let (status, body) = send(&app, Method::GET, "/charts", None).await;
    assert_eq!(status, StatusCode::OK);
    let charts = body.as_array().unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0]["id"], "neuralChart");
    assert_eq!(charts[0]["series"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_theme_toggle_endpoint() {
    let app = router(Profile::plain());
    let (status, body) = send(&app, Method::POST, "/theme/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "applied");
    assert_eq!(body["session"]["theme"], "dark");
}

#[tokio::test]
async fn test_install_accept_reports_dismissal() {
    let h = harness(Profile::plain());
    h.install.set_outcome(InstallOutcome::Dismissed);
    let app = create_router(ApiContext::new(h.controller, h.view));

    send(&app, Method::POST, "/install/available", None).await;
    let (status, body) = send(&app, Method::POST, "/install/accept", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["message"], "Installation cancelled");
    assert_eq!(body["session"]["install"], "notavailable");
}
