/*!
 * End-to-end session lifecycle tests against the controller
 */

use anyhow::Result;
use std::sync::Arc;

use signbridge::analyzer::FrameAnalyzer;
use signbridge::database::models::{RecognitionSource, SessionStatus, UserProfileRecord, UserRole};
use signbridge::errors::{AppError, SessionError};
use signbridge::session::{AnalyzeFrameParams, FeedbackParams, SessionController};

use crate::common;
use crate::common::mock_providers::{ScriptedProvider, UnavailableProvider};

fn frame_params(session_id: Option<String>, user: Option<&str>) -> AnalyzeFrameParams {
    AnalyzeFrameParams {
        session_id,
        user: user.map(String::from),
        language_code: "ASL".to_string(),
        frame_base64: common::valid_frame_data_url(),
        device_info: "integration-test".to_string(),
    }
}

#[tokio::test]
async fn test_fullLifecycle_shouldRecordTranslateAndEnd() -> Result<()> {
    let controller = common::demo_controller().await?;

    // First frame creates the session
    let outcome = controller.analyze_frame(frame_params(None, None)).await?;
    let session = controller.get_session(&outcome.session_id).await?.unwrap();
    assert_eq!(session.status, SessionStatus::Active);
    assert_eq!(session.language_code.as_deref(), Some("ASL"));

    // The record carries a usable translation
    assert!(!outcome.record.translated_text.is_empty());
    assert!((0.0..=1.0).contains(&outcome.record.confidence_score));

    // Ending moves the session to its terminal state
    let ended = controller.end_session(&outcome.session_id).await?;
    assert_eq!(ended.status, SessionStatus::Ended);
    assert!(ended.ended_at.is_some());

    // A second end is a no-op success
    let again = controller.end_session(&outcome.session_id).await?;
    assert_eq!(again.ended_at, ended.ended_at);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_withScriptedProvider_shouldPersistRecognition() -> Result<()> {
    let repo = common::seeded_repository().await?;
    let provider = ScriptedProvider::hello();
    let tracker = provider.tracker();
    let analyzer = FrameAnalyzer::with_provider(Arc::new(provider), false);
    let controller = SessionController::new(repo, analyzer, None);

    let outcome = controller.analyze_frame(frame_params(None, None)).await?;

    assert_eq!(outcome.record.detected_sign, "Hello");
    assert_eq!(outcome.record.source, RecognitionSource::Live);
    assert_eq!(tracker.lock().unwrap().call_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_withDownProvider_shouldKeepSessionRunning() -> Result<()> {
    let repo = common::seeded_repository().await?;
    let analyzer = FrameAnalyzer::with_provider(Arc::new(UnavailableProvider), false);
    let controller = SessionController::new(repo, analyzer, None);

    // The provider is down but the loop must not break
    let first = controller.analyze_frame(frame_params(None, None)).await?;
    let second = controller
        .analyze_frame(frame_params(Some(first.session_id.clone()), None))
        .await?;

    assert_eq!(first.record.source, RecognitionSource::Fallback);
    assert_eq!(second.record.confidence_score, 0.0);

    let records = controller.repository().get_records(&first.session_id).await?;
    assert_eq!(records.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_feedbackAfterEnd_shouldBeAccepted() -> Result<()> {
    let controller = common::demo_controller().await?;

    let outcome = controller.analyze_frame(frame_params(None, None)).await?;
    controller.end_session(&outcome.session_id).await?;

    let feedback = controller
        .submit_feedback(FeedbackParams {
            session_id: outcome.session_id.clone(),
            rating: 4,
            correction: Some("It meant goodbye".to_string()),
            comment: None,
        })
        .await?;
    assert_eq!(feedback.session_id, outcome.session_id);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_userHistory_shouldAccumulateAcrossSessions() -> Result<()> {
    let controller = common::demo_controller().await?;
    controller
        .repository()
        .create_user(&UserProfileRecord::new("carol", UserRole::Viewer))
        .await?;

    // Two sessions with two and one frames respectively
    let first = controller
        .analyze_frame(frame_params(None, Some("carol")))
        .await?;
    controller
        .analyze_frame(frame_params(Some(first.session_id.clone()), Some("carol")))
        .await?;
    controller.end_session(&first.session_id).await?;
    controller
        .analyze_frame(frame_params(None, Some("carol")))
        .await?;

    let history = controller.session_history("carol").await?;
    assert_eq!(history.len(), 2);
    let total: usize = history.iter().map(|h| h.record_count()).sum();
    assert_eq!(total, 3);

    let profile = controller.repository().get_user("carol").await?.unwrap();
    assert_eq!(profile.total_translations, 3);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_resumingEndedSession_shouldFail() -> Result<()> {
    let controller = common::demo_controller().await?;

    let outcome = controller.analyze_frame(frame_params(None, None)).await?;
    controller.end_session(&outcome.session_id).await?;

    let result = controller
        .analyze_frame(frame_params(Some(outcome.session_id), None))
        .await;
    assert!(matches!(
        result,
        Err(AppError::Session(SessionError::NoActiveSession(_)))
    ));
    Ok(())
}
