/*!
 * Session store for signbridge.
 *
 * This module provides SQLite-backed persistence for the five entity types:
 * - `connection`: Database connection management with async support
 * - `schema`: Schema definitions and migrations
 * - `models`: Entity models (languages, sessions, records, profiles, feedback)
 * - `repository`: High-level typed database operations
 */

pub mod connection;
pub mod models;
pub mod repository;
pub mod schema;

// Re-export commonly used types
pub use connection::{DatabaseConnection, DatabaseStats};
pub use models::{
    FeedbackRecord, RecognitionSource, SessionRecord, SessionStatus, SignLanguageRecord,
    TranslationRecord, UserProfileRecord, UserRole,
};
pub use repository::Repository;
