/*!
 * Repository layer for database operations.
 *
 * This module provides a high-level API for all database operations,
 * abstracting away the SQL details and providing type-safe access.
 */

use anyhow::Result;
use log::debug;
use rusqlite::{params, OptionalExtension, Row};

use super::connection::{DatabaseConnection, DatabaseStats};
use super::models::{
    FeedbackRecord, RecognitionSource, SessionRecord, SessionStatus, SignLanguageRecord,
    TranslationRecord, UserProfileRecord, UserRole,
};

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

/// Parse a session row in SELECT column order
fn parse_session_row(row: &Row) -> rusqlite::Result<SessionRecord> {
    Ok(SessionRecord {
        id: row.get(0)?,
        user: row.get(1)?,
        language_code: row.get(2)?,
        status: row
            .get::<_, String>(3)?
            .parse()
            .unwrap_or(SessionStatus::Active),
        started_at: row.get(4)?,
        ended_at: row.get(5)?,
        device_info: row.get(6)?,
    })
}

/// Parse a translation record row in SELECT column order
fn parse_record_row(row: &Row) -> rusqlite::Result<TranslationRecord> {
    Ok(TranslationRecord {
        id: row.get(0)?,
        session_id: row.get(1)?,
        detected_sign: row.get(2)?,
        translated_text: row.get(3)?,
        confidence_score: row.get(4)?,
        source: row
            .get::<_, String>(5)?
            .parse()
            .unwrap_or(RecognitionSource::Live),
        description: row.get(6)?,
        frame_path: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// Parse a sign language row in SELECT column order
fn parse_language_row(row: &Row) -> rusqlite::Result<SignLanguageRecord> {
    Ok(SignLanguageRecord {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        is_active: row.get(4)?,
    })
}

/// Parse a user profile row in SELECT column order
fn parse_user_row(row: &Row) -> rusqlite::Result<UserProfileRecord> {
    Ok(UserProfileRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        role: row.get::<_, String>(2)?.parse().unwrap_or(UserRole::Viewer),
        preferred_language: row.get(3)?,
        total_translations: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Parse a feedback row in SELECT column order
fn parse_feedback_row(row: &Row) -> rusqlite::Result<FeedbackRecord> {
    Ok(FeedbackRecord {
        id: row.get(0)?,
        session_id: row.get(1)?,
        rating: row.get(2)?,
        correction: row.get(3)?,
        comment: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Get store-wide counters for the landing page
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.db.stats()
    }

    // =========================================================================
    // Sign Language Operations
    // =========================================================================

    /// Seed sign language reference data, skipping codes that already exist
    ///
    /// Returns the number of newly created rows.
    pub async fn seed_languages(&self, languages: Vec<SignLanguageRecord>) -> Result<usize> {
        self.db
            .transaction_async(move |tx| {
                let mut created = 0;
                for lang in &languages {
                    let inserted = tx.execute(
                        "INSERT OR IGNORE INTO sign_languages (code, name, description, is_active)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![lang.code, lang.name, lang.description, lang.is_active],
                    )?;
                    created += inserted;
                }
                Ok(created)
            })
            .await
    }

    /// Get a sign language by its unique code
    pub async fn get_language(&self, code: &str) -> Result<Option<SignLanguageRecord>> {
        let code = code.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        "SELECT id, code, name, description, is_active
                         FROM sign_languages WHERE code = ?1",
                        [code],
                        parse_language_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// List all active sign languages, ordered by code
    pub async fn list_active_languages(&self) -> Result<Vec<SignLanguageRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, code, name, description, is_active
                     FROM sign_languages WHERE is_active = 1 ORDER BY code",
                )?;
                let languages = stmt
                    .query_map([], parse_language_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(languages)
            })
            .await
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Create a new translation session
    pub async fn create_session(&self, session: &SessionRecord) -> Result<()> {
        let session = session.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO sessions (id, user, language_code, status, started_at, ended_at, device_info)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                    "#,
                    params![
                        session.id,
                        session.user,
                        session.language_code,
                        session.status.to_string(),
                        session.started_at,
                        session.ended_at,
                        session.device_info,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    /// Get a session by ID
    pub async fn get_session(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let session_id = session_id.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        "SELECT id, user, language_code, status, started_at, ended_at, device_info
                         FROM sessions WHERE id = ?1",
                        [session_id],
                        parse_session_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// Update a session's chosen sign language
    pub async fn set_session_language(&self, session_id: &str, language_code: &str) -> Result<()> {
        let session_id = session_id.to_string();
        let language_code = language_code.to_string();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    "UPDATE sessions SET language_code = ?1 WHERE id = ?2",
                    params![language_code, session_id],
                )?;
                Ok(())
            })
            .await
    }

    /// Close an active session, setting its end timestamp exactly once
    ///
    /// The WHERE clause keeps the operation idempotent: an already-ended
    /// session is left untouched and `false` is returned.
    pub async fn end_session(&self, session_id: &str) -> Result<bool> {
        let session_id = session_id.to_string();
        let now = chrono::Utc::now().to_rfc3339();

        self.db
            .execute_async(move |conn| {
                let changed = conn.execute(
                    "UPDATE sessions SET status = 'ended', ended_at = ?1
                     WHERE id = ?2 AND status = 'active'",
                    params![now, session_id],
                )?;
                Ok(changed > 0)
            })
            .await
    }

    /// List sessions, optionally filtered by owner, most recent first
    pub async fn list_sessions(&self, user: Option<&str>) -> Result<Vec<SessionRecord>> {
        let user = user.map(|u| u.to_string());

        self.db
            .execute_async(move |conn| {
                let sessions: Vec<SessionRecord> = if let Some(user) = user {
                    let mut stmt = conn.prepare(
                        "SELECT id, user, language_code, status, started_at, ended_at, device_info
                         FROM sessions WHERE user = ?1 ORDER BY started_at DESC",
                    )?;
                    stmt.query_map([user], parse_session_row)?
                        .filter_map(|r| r.ok())
                        .collect()
                } else {
                    let mut stmt = conn.prepare(
                        "SELECT id, user, language_code, status, started_at, ended_at, device_info
                         FROM sessions ORDER BY started_at DESC",
                    )?;
                    stmt.query_map([], parse_session_row)?
                        .filter_map(|r| r.ok())
                        .collect()
                };
                Ok(sessions)
            })
            .await
    }

    // =========================================================================
    // Translation Record Operations
    // =========================================================================

    /// Append one translation record, crediting the owner's running total
    ///
    /// The insert and the profile counter update happen in one transaction.
    /// Returns the stored record with its database ID assigned.
    pub async fn insert_record(
        &self,
        record: &TranslationRecord,
        owner: Option<&str>,
    ) -> Result<TranslationRecord> {
        let mut record = record.clone();
        let owner = owner.map(|u| u.to_string());

        self.db
            .transaction_async(move |tx| {
                tx.execute(
                    r#"
                    INSERT INTO translation_records (
                        session_id, detected_sign, translated_text, confidence_score,
                        source, description, frame_path, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        record.session_id,
                        record.detected_sign,
                        record.translated_text,
                        record.confidence_score,
                        record.source.to_string(),
                        record.description,
                        record.frame_path,
                        record.created_at,
                    ],
                )?;
                record.id = tx.last_insert_rowid();

                if let Some(owner) = owner {
                    tx.execute(
                        "UPDATE user_profiles SET total_translations = total_translations + 1
                         WHERE username = ?1",
                        [owner],
                    )?;
                }

                debug!("Stored translation record {}", record.id);
                Ok(record)
            })
            .await
    }

    /// Get all records for a session in creation order
    pub async fn get_records(&self, session_id: &str) -> Result<Vec<TranslationRecord>> {
        let session_id = session_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, session_id, detected_sign, translated_text, confidence_score,
                            source, description, frame_path, created_at
                     FROM translation_records WHERE session_id = ?1 ORDER BY id",
                )?;
                let records = stmt
                    .query_map([session_id], parse_record_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(records)
            })
            .await
    }

    // =========================================================================
    // User Profile Operations
    // =========================================================================

    /// Create a new user profile
    pub async fn create_user(&self, profile: &UserProfileRecord) -> Result<UserProfileRecord> {
        let mut profile = profile.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO user_profiles (username, role, preferred_language, total_translations, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        profile.username,
                        profile.role.to_string(),
                        profile.preferred_language,
                        profile.total_translations,
                        profile.created_at,
                    ],
                )?;
                profile.id = conn.last_insert_rowid();
                Ok(profile)
            })
            .await
    }

    /// Get a user profile by username
    pub async fn get_user(&self, username: &str) -> Result<Option<UserProfileRecord>> {
        let username = username.to_string();

        self.db
            .execute_async(move |conn| {
                let result = conn
                    .query_row(
                        "SELECT id, username, role, preferred_language, total_translations, created_at
                         FROM user_profiles WHERE username = ?1",
                        [username],
                        parse_user_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await
    }

    /// List all user profiles, ordered by username
    pub async fn list_users(&self) -> Result<Vec<UserProfileRecord>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, username, role, preferred_language, total_translations, created_at
                     FROM user_profiles ORDER BY username",
                )?;
                let users = stmt
                    .query_map([], parse_user_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(users)
            })
            .await
    }

    // =========================================================================
    // Feedback Operations
    // =========================================================================

    /// Append a feedback entry for a session
    pub async fn insert_feedback(&self, feedback: &FeedbackRecord) -> Result<FeedbackRecord> {
        let mut feedback = feedback.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO feedback (session_id, rating, correction, comment, created_at)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                    params![
                        feedback.session_id,
                        feedback.rating,
                        feedback.correction,
                        feedback.comment,
                        feedback.created_at,
                    ],
                )?;
                feedback.id = conn.last_insert_rowid();
                Ok(feedback)
            })
            .await
    }

    /// Get all feedback entries for a session in creation order
    pub async fn get_feedback(&self, session_id: &str) -> Result<Vec<FeedbackRecord>> {
        let session_id = session_id.to_string();

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, session_id, rating, correction, comment, created_at
                     FROM feedback WHERE session_id = ?1 ORDER BY id",
                )?;
                let feedback = stmt
                    .query_map([session_id], parse_feedback_row)?
                    .filter_map(|r| r.ok())
                    .collect();
                Ok(feedback)
            })
            .await
    }
}
