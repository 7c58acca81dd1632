/*!
 * Session-specific models and DTOs.
 *
 * These structures carry the inputs and outputs of the session controller,
 * a higher-level abstraction over the raw database records.
 */

use serde::{Deserialize, Serialize};

use crate::database::models::{SessionRecord, TranslationRecord};

/// Parameters for a single analyze-frame call
#[derive(Debug, Clone)]
pub struct AnalyzeFrameParams {
    /// Existing session to append to; None starts a new session
    pub session_id: Option<String>,
    /// Authenticated caller, if any
    pub user: Option<String>,
    /// Sign language code the frame should be interpreted as
    pub language_code: String,
    /// Base64-encoded JPEG frame (data-URL prefix tolerated)
    pub frame_base64: String,
    /// Browser / device identification string
    pub device_info: String,
}

/// Parameters for a feedback submission
#[derive(Debug, Clone)]
pub struct FeedbackParams {
    /// Session the feedback refers to
    pub session_id: String,
    /// Star rating, 1 to 5
    pub rating: i64,
    /// What the sign actually meant, if corrected
    pub correction: Option<String>,
    /// Free-text comment
    pub comment: Option<String>,
}

/// Result of a successful analyze-frame call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeOutcome {
    /// The session the record was appended to
    pub session_id: String,
    /// The persisted translation record
    pub record: TranslationRecord,
}

/// A session together with its ordered records, for history views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHistory {
    /// The session itself
    pub session: SessionRecord,
    /// All records in creation order
    pub records: Vec<TranslationRecord>,
}

impl SessionHistory {
    /// Number of translations captured in this session
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
