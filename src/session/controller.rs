/*!
 * Session controller for the capture-and-translate lifecycle.
 *
 * This module orchestrates create-session, repeated analyze-frame,
 * end-session and feedback, writing results into the session store.
 * Per session the state machine is NEW -> ACTIVE -> ENDED; ending is
 * idempotent and feedback is accepted against any existing session.
 */

use anyhow::Result;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::analyzer::{FrameAnalysis, FrameAnalyzer};
use crate::database::models::{
    FeedbackRecord, RecognitionSource, SessionRecord, TranslationRecord,
};
use crate::database::repository::Repository;
use crate::errors::{AnalyzerError, AppError, SessionError};
use crate::frame_store::FrameStore;
use crate::providers::SignRecognition;

use super::models::{AnalyzeFrameParams, AnalyzeOutcome, FeedbackParams, SessionHistory};

/// Convert a database-layer failure into an application error
fn db_err(error: anyhow::Error) -> AppError {
    AppError::Database(error.to_string())
}

/// Session controller orchestrating the translation lifecycle
#[derive(Clone)]
pub struct SessionController {
    /// Repository for database operations
    repo: Repository,
    /// The frame analyzer (live or demo, fixed at construction)
    analyzer: FrameAnalyzer,
    /// Optional snapshot storage for analyzed frames
    frame_store: Option<FrameStore>,
}

impl SessionController {
    /// Create a new session controller
    pub fn new(repo: Repository, analyzer: FrameAnalyzer, frame_store: Option<FrameStore>) -> Self {
        Self {
            repo,
            analyzer,
            frame_store,
        }
    }

    /// Get the underlying repository
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Get the frame analyzer
    pub fn analyzer(&self) -> &FrameAnalyzer {
        &self.analyzer
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Create a new active session
    ///
    /// An unknown language code leaves the session's language unset, matching
    /// the forgiving behavior of the capture page.
    pub async fn start_session(
        &self,
        user: Option<String>,
        language_code: Option<String>,
        device_info: String,
    ) -> Result<SessionRecord, AppError> {
        let session_id = Uuid::new_v4().to_string();

        let language_code = match language_code {
            Some(code) => self
                .repo
                .get_language(&code)
                .await
                .map_err(db_err)?
                .map(|l| l.code),
            None => None,
        };

        let session = SessionRecord::new(session_id, user, language_code, device_info);
        self.repo.create_session(&session).await.map_err(db_err)?;

        info!(
            "Started session {} for {}",
            &session.id[..8],
            session.user.as_deref().unwrap_or("anonymous")
        );

        Ok(session)
    }

    /// Analyze one frame, appending exactly one record to the session
    ///
    /// A missing `session_id` starts a new session (first-frame creation).
    /// An unknown or already-ended session fails with `NoActiveSession`.
    /// Provider failures degrade into a zero-confidence fallback record so
    /// the capture loop keeps running.
    pub async fn analyze_frame(&self, params: AnalyzeFrameParams) -> Result<AnalyzeOutcome, AppError> {
        // Validate the payload before touching any session state
        let frame_jpeg = FrameAnalyzer::decode_frame(&params.frame_base64)?;

        let session = match &params.session_id {
            Some(id) => match self.repo.get_session(id).await.map_err(db_err)? {
                Some(session) if session.is_active() => session,
                Some(session) => {
                    return Err(SessionError::NoActiveSession(session.id).into());
                }
                None => {
                    return Err(SessionError::NoActiveSession(id.clone()).into());
                }
            },
            None => {
                self.start_session(
                    params.user.clone(),
                    Some(params.language_code.clone()),
                    params.device_info.clone(),
                )
                .await?
            }
        };

        // Keep the session's language in step with what the page sends
        if session.language_code.as_deref() != Some(params.language_code.as_str()) {
            if let Some(lang) = self
                .repo
                .get_language(&params.language_code)
                .await
                .map_err(db_err)?
            {
                self.repo
                    .set_session_language(&session.id, &lang.code)
                    .await
                    .map_err(db_err)?;
            }
        }

        let analysis = match self
            .analyzer
            .analyze(&params.frame_base64, &params.language_code)
            .await
        {
            Ok(analysis) => analysis,
            Err(AnalyzerError::AnalysisUnavailable(reason)) => {
                // Fail-soft: the session continues with a no-detection record
                warn!(
                    "Analyzer unavailable for session {}: {}",
                    &session.id[..8],
                    reason
                );
                FrameAnalysis {
                    recognition: SignRecognition::no_detection(),
                    source: RecognitionSource::Fallback,
                }
            }
            Err(err @ AnalyzerError::InvalidFrameData(_)) => return Err(err.into()),
        };

        let mut record = TranslationRecord::new(
            session.id.clone(),
            analysis.recognition.detected_sign,
            analysis.recognition.translated_text,
            analysis.recognition.confidence_score,
            analysis.source,
            analysis.recognition.description,
        );

        if let Some(store) = &self.frame_store {
            match store.store(frame_jpeg).await {
                Ok(filename) => record.frame_path = Some(filename),
                Err(e) => warn!("Failed to store frame snapshot: {}", e),
            }
        }

        let stored = self
            .repo
            .insert_record(&record, session.user.as_deref())
            .await
            .map_err(db_err)?;

        debug!(
            "Session {}: recorded '{}' ({:.0}%, {})",
            &session.id[..8],
            stored.detected_sign,
            stored.confidence_score * 100.0,
            stored.source
        );

        Ok(AnalyzeOutcome {
            session_id: session.id,
            record: stored,
        })
    }

    /// Close a session, idempotently
    ///
    /// Ending an already-ended session is a no-op success; the original
    /// end timestamp is never touched.
    pub async fn end_session(&self, session_id: &str) -> Result<SessionRecord, AppError> {
        match self.repo.get_session(session_id).await.map_err(db_err)? {
            None => Err(SessionError::SessionNotFound(session_id.to_string()).into()),
            Some(session) => {
                if session.is_active() {
                    self.repo.end_session(session_id).await.map_err(db_err)?;
                    info!("Ended session {}", &session_id[..8.min(session_id.len())]);
                    self.repo
                        .get_session(session_id)
                        .await
                        .map_err(db_err)?
                        .ok_or_else(|| {
                            SessionError::SessionNotFound(session_id.to_string()).into()
                        })
                } else {
                    debug!(
                        "Session {} already ended, no-op",
                        &session_id[..8.min(session_id.len())]
                    );
                    Ok(session)
                }
            }
        }
    }

    /// Attach a feedback rating to an existing session
    ///
    /// The session may be active or ended; a nonexistent session fails with
    /// `SessionNotFound` and nothing is written.
    pub async fn submit_feedback(&self, params: FeedbackParams) -> Result<FeedbackRecord, AppError> {
        if !(1..=5).contains(&params.rating) {
            return Err(SessionError::InvalidRating(params.rating).into());
        }

        if self
            .repo
            .get_session(&params.session_id)
            .await
            .map_err(db_err)?
            .is_none()
        {
            return Err(SessionError::SessionNotFound(params.session_id).into());
        }

        let feedback = FeedbackRecord::new(
            params.session_id,
            params.rating,
            params.correction,
            params.comment,
        );

        let stored = self.repo.insert_feedback(&feedback).await.map_err(db_err)?;
        info!(
            "Recorded {}-star feedback for session {}",
            stored.rating,
            &stored.session_id[..8]
        );
        Ok(stored)
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>, AppError> {
        self.repo.get_session(session_id).await.map_err(db_err)
    }

    /// List a caller's sessions with their records, most recent first
    pub async fn session_history(&self, user: &str) -> Result<Vec<SessionHistory>, AppError> {
        let sessions = self.repo.list_sessions(Some(user)).await.map_err(db_err)?;

        let mut history = Vec::with_capacity(sessions.len());
        for session in sessions {
            let records = self.repo.get_records(&session.id).await.map_err(db_err)?;
            history.push(SessionHistory { session, records });
        }

        Ok(history)
    }
}
