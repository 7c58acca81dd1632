/*!
 * Database entity models.
 *
 * These structures map directly to database tables and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Session status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is open and accepting frames
    Active,
    /// Session has been closed
    Ended,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Ended => write!(f, "ended"),
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(SessionStatus::Active),
            "ended" => Ok(SessionStatus::Ended),
            _ => Err(anyhow::anyhow!("Invalid session status: {}", s)),
        }
    }
}

/// Origin of a recognition result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionSource {
    /// Result came from the live vision API
    Live,
    /// Result came from the canned demo set (no API key configured)
    Demo,
    /// Soft "no detection" result written after an analyzer failure
    Fallback,
}

impl fmt::Display for RecognitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecognitionSource::Live => write!(f, "live"),
            RecognitionSource::Demo => write!(f, "demo"),
            RecognitionSource::Fallback => write!(f, "fallback"),
        }
    }
}

impl std::str::FromStr for RecognitionSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(RecognitionSource::Live),
            "demo" => Ok(RecognitionSource::Demo),
            "fallback" => Ok(RecognitionSource::Fallback),
            _ => Err(anyhow::anyhow!("Invalid recognition source: {}", s)),
        }
    }
}

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular user
    Viewer,
    /// Administrative user
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Viewer => write!(f, "viewer"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(UserRole::Viewer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// Supported sign language variety, e.g. ASL, BSL, KSL
///
/// Seeded once via the `seed` command; immutable reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignLanguageRecord {
    /// Database ID
    pub id: i64,
    /// Short unique code (e.g. "ASL")
    pub code: String,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Whether this language is offered in the UI
    pub is_active: bool,
}

impl SignLanguageRecord {
    /// Create a new sign language record (without database ID)
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0, // Will be assigned by database
            code: code.into(),
            name: name.into(),
            description: description.into(),
            is_active: true,
        }
    }
}

/// Translation session record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique session identifier (UUID)
    pub id: String,
    /// Owning username; None for anonymous sessions
    pub user: Option<String>,
    /// Chosen sign language code, if any
    pub language_code: Option<String>,
    /// Current session status
    pub status: SessionStatus,
    /// Start timestamp (ISO 8601)
    pub started_at: String,
    /// End timestamp (ISO 8601); None until the session is closed
    pub ended_at: Option<String>,
    /// Browser / device used
    pub device_info: String,
}

impl SessionRecord {
    /// Create a new active session record
    pub fn new(id: String, user: Option<String>, language_code: Option<String>, device_info: String) -> Self {
        Self {
            id,
            user,
            language_code,
            status: SessionStatus::Active,
            started_at: chrono::Utc::now().to_rfc3339(),
            ended_at: None,
            device_info,
        }
    }

    /// Check whether the session still accepts frames
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }
}

/// A single translated sign captured within a session
///
/// Append-only; one record per analyzed frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Database ID
    pub id: i64,
    /// Session this record belongs to
    pub session_id: String,
    /// Sign / gesture detected by the vision model
    pub detected_sign: String,
    /// Human-readable text translation
    pub translated_text: String,
    /// Model confidence, clamped to [0, 1]
    pub confidence_score: f64,
    /// Where the recognition came from (live, demo, fallback)
    pub source: RecognitionSource,
    /// Brief description of the observed hand position
    pub description: String,
    /// Stored frame snapshot reference, if snapshots are enabled
    pub frame_path: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl TranslationRecord {
    /// Create a new translation record (without database ID)
    pub fn new(
        session_id: String,
        detected_sign: String,
        translated_text: String,
        confidence_score: f64,
        source: RecognitionSource,
        description: String,
    ) -> Self {
        Self {
            id: 0, // Will be assigned by database
            session_id,
            detected_sign,
            translated_text,
            confidence_score: confidence_score.clamp(0.0, 1.0),
            source,
            description,
            frame_path: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Extended profile for signbridge users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileRecord {
    /// Database ID
    pub id: i64,
    /// Unique username
    pub username: String,
    /// User role
    pub role: UserRole,
    /// Preferred sign language code, if set
    pub preferred_language: Option<String>,
    /// Running count of translations produced for this user
    pub total_translations: i64,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl UserProfileRecord {
    /// Create a new user profile record (without database ID)
    pub fn new(username: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: 0, // Will be assigned by database
            username: username.into(),
            role,
            preferred_language: None,
            total_translations: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// User feedback attached to a session
///
/// Append-only; a session may collect several feedback entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Database ID
    pub id: i64,
    /// Session the feedback refers to
    pub session_id: String,
    /// Star rating, 1 to 5
    pub rating: i64,
    /// What the sign actually meant, if the user corrected it
    pub correction: Option<String>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
}

impl FeedbackRecord {
    /// Create a new feedback record (without database ID)
    pub fn new(
        session_id: String,
        rating: i64,
        correction: Option<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: 0, // Will be assigned by database
            session_id,
            rating,
            correction,
            comment,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
