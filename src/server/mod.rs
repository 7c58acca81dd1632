/*!
 * HTTP server for the capture-and-translate API.
 *
 * This module contains:
 * - The axum router and shared application state
 * - JSON API handlers for analyze-frame, end-session and feedback
 * - The mapping from application errors to HTTP responses
 *
 * Server-rendered pages live in the `pages` submodule.
 */

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;

use crate::database::models::RecognitionSource;
use crate::errors::{AnalyzerError, AppError, SessionError};
use crate::session::{AnalyzeFrameParams, FeedbackParams, SessionController};

pub mod pages;

/// Header naming the calling user's profile
pub const USER_HEADER: &str = "x-signbridge-user";

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    /// The session controller driving all operations
    pub controller: SessionController,
}

impl AppState {
    /// Create the shared state
    pub fn new(controller: SessionController) -> Self {
        Self { controller }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Analyzer(AnalyzerError::InvalidFrameData(_)) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::NoActiveSession(_)) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::InvalidRating(_)) => StatusCode::BAD_REQUEST,
            AppError::Session(SessionError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::landing))
        .route("/translate", get(pages::translate))
        .route("/history", get(pages::history))
        .route("/about", get(pages::about))
        .route("/api/analyze-frame/", post(analyze_frame))
        .route("/api/end-session/", post(end_session))
        .route("/api/feedback/", post(feedback))
        .with_state(state)
}

/// Bind and serve the router until the process is stopped
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Server terminated unexpectedly")
}

/// Read the calling user from the request headers, if present
fn caller(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Read the device description from the request headers
fn device_info(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

// =============================================================================
// API types
// =============================================================================

/// Request body for POST /api/analyze-frame/
#[derive(Debug, Deserialize)]
pub struct AnalyzeFrameRequest {
    /// Existing session to append to; omit to start a new one
    #[serde(default)]
    pub session_id: Option<String>,
    /// Sign language code to interpret against
    pub language_code: String,
    /// Base64-encoded JPEG frame, data-URL prefix tolerated
    pub frame_base64: String,
}

/// Response body for POST /api/analyze-frame/
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeFrameResponse {
    pub session_id: String,
    pub record_id: i64,
    pub detected_sign: String,
    pub translated_text: String,
    pub confidence_score: f64,
    pub source: RecognitionSource,
    pub description: String,
}

/// Request body for POST /api/end-session/
#[derive(Debug, Deserialize)]
pub struct EndSessionRequest {
    pub session_id: String,
}

/// Response body for POST /api/end-session/
#[derive(Debug, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub status: String,
    pub session_id: String,
    pub ended_at: Option<String>,
}

/// Request body for POST /api/feedback/
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub session_id: String,
    pub rating: i64,
    #[serde(default)]
    pub correction: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Response body for POST /api/feedback/
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub status: String,
}

// =============================================================================
// API handlers
// =============================================================================

/// Analyze one captured frame and append it to a session
async fn analyze_frame(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeFrameRequest>,
) -> Result<Json<AnalyzeFrameResponse>, AppError> {
    let outcome = state
        .controller
        .analyze_frame(AnalyzeFrameParams {
            session_id: request.session_id,
            user: caller(&headers),
            language_code: request.language_code,
            frame_base64: request.frame_base64,
            device_info: device_info(&headers),
        })
        .await?;

    Ok(Json(AnalyzeFrameResponse {
        session_id: outcome.session_id,
        record_id: outcome.record.id,
        detected_sign: outcome.record.detected_sign,
        translated_text: outcome.record.translated_text,
        confidence_score: outcome.record.confidence_score,
        source: outcome.record.source,
        description: outcome.record.description,
    }))
}

/// Close a session; repeated calls are a no-op success
async fn end_session(
    State(state): State<AppState>,
    Json(request): Json<EndSessionRequest>,
) -> Result<Json<EndSessionResponse>, AppError> {
    let session = state.controller.end_session(&request.session_id).await?;

    Ok(Json(EndSessionResponse {
        status: "ended".to_string(),
        session_id: session.id,
        ended_at: session.ended_at,
    }))
}

/// Record a feedback rating against an existing session
async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    state
        .controller
        .submit_feedback(FeedbackParams {
            session_id: request.session_id,
            rating: request.rating,
            correction: request.correction,
            comment: request.comment,
        })
        .await?;

    Ok(Json(FeedbackResponse {
        status: "recorded".to_string(),
    }))
}
