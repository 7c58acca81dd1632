/*!
 * HTTP API tests exercising the full router
 */

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use signbridge::analyzer::FrameAnalyzer;
use signbridge::app_config::VisionConfig;
use signbridge::database::models::{UserProfileRecord, UserRole};
use signbridge::server::{build_router, AppState, USER_HEADER};
use signbridge::session::SessionController;

use crate::common;

async fn test_state() -> Result<AppState> {
    let repo = common::seeded_repository().await?;
    let analyzer = FrameAnalyzer::new(&VisionConfig::default());
    Ok(AppState::new(SessionController::new(repo, analyzer, None)))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn analyze_once(router: &Router) -> Result<Value> {
    let request = post_json(
        "/api/analyze-frame/",
        json!({
            "language_code": "ASL",
            "frame_base64": common::valid_frame_data_url(),
        }),
    );
    let response = router.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_captureLoop_analyzeEndFeedback_shouldSucceed() -> Result<()> {
    let state = test_state().await?;
    let router = build_router(state);

    // Analyze two frames into the same session
    let first = analyze_once(&router).await?;
    let session_id = first["session_id"].as_str().unwrap().to_string();

    let request = post_json(
        "/api/analyze-frame/",
        json!({
            "session_id": session_id,
            "language_code": "ASL",
            "frame_base64": common::valid_frame(),
        }),
    );
    let response = router.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await?;
    assert_eq!(second["session_id"], first["session_id"]);
    assert_eq!(second["source"], "demo");

    // End it
    let response = router
        .clone()
        .oneshot(post_json("/api/end-session/", json!({ "session_id": session_id })))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["status"], "ended");

    // Feedback still lands on the ended session
    let response = router
        .oneshot(post_json(
            "/api/feedback/",
            json!({ "session_id": session_id, "rating": 5, "comment": "great" }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await?["status"], "recorded");
    Ok(())
}

#[tokio::test]
async fn test_analyzeFrame_errorBodies_shouldBeJson() -> Result<()> {
    let state = test_state().await?;
    let router = build_router(state);

    let response = router
        .oneshot(post_json(
            "/api/analyze-frame/",
            json!({ "language_code": "ASL", "frame_base64": "###" }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_historyPage_withKnownUser_shouldListSessions() -> Result<()> {
    let state = test_state().await?;
    state
        .controller
        .repository()
        .create_user(&UserProfileRecord::new("dana", UserRole::Viewer))
        .await?;
    let router = build_router(state);

    // One owned session with a frame
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze-frame/")
        .header("content-type", "application/json")
        .header(USER_HEADER, "dana")
        .body(Body::from(
            json!({
                "language_code": "ASL",
                "frame_base64": common::valid_frame(),
            })
            .to_string(),
        ))?;
    let response = router.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .uri("/history")
        .header(USER_HEADER, "dana")
        .body(Body::empty())?;
    let response = router.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let html = String::from_utf8(bytes.to_vec())?;
    assert!(html.contains("dana"));
    assert!(html.contains("1 translations"));
    Ok(())
}

#[tokio::test]
async fn test_historyPage_withUnknownUser_shouldReturn401() -> Result<()> {
    let state = test_state().await?;
    let router = build_router(state);

    let request = Request::builder()
        .uri("/history")
        .header(USER_HEADER, "nobody")
        .body(Body::empty())?;
    let response = router.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_staticPages_shouldRender() -> Result<()> {
    let state = test_state().await?;
    let router = build_router(state);

    for uri in ["/", "/translate", "/about"] {
        let request = Request::builder().uri(uri).body(Body::empty())?;
        let response = router.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::OK, "GET {} failed", uri);
    }
    Ok(())
}
