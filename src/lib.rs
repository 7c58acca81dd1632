/*!
 * # SignBridge - Sign Language to Speech
 *
 * A Rust server that turns camera frames of sign language into spoken text.
 *
 * ## Features
 *
 * - Browser capture loop: camera frames posted as base64 JPEG
 * - Gesture recognition via a cloud vision model (Google Gemini)
 * - Demo mode with canned recognitions when no API key is configured
 * - Session history persisted in SQLite
 * - Feedback ratings on past sessions
 * - Speech output in the browser via the Web Speech API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `analyzer`: Frame analysis against the configured vision provider
 * - `providers`: Vision provider clients:
 *   - `providers::gemini`: Google Gemini REST client
 *   - `providers::demo`: Canned demo recognitions
 * - `database`: SQLite persistence:
 *   - `database::connection`: Async connection wrapper
 *   - `database::schema`: Versioned schema management
 *   - `database::models`: Entity records and status enums
 *   - `database::repository`: Typed CRUD operations
 * - `session`: Session lifecycle controller and DTOs
 * - `frame_store`: Optional on-disk frame snapshots
 * - `server`: HTTP API and server-rendered pages
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analyzer;
pub mod app_config;
pub mod database;
pub mod errors;
pub mod frame_store;
pub mod providers;
pub mod server;
pub mod session;

// Re-export main types for easier usage
pub use analyzer::{FrameAnalysis, FrameAnalyzer};
pub use app_config::Config;
pub use database::repository::Repository;
pub use errors::{AnalyzerError, AppError, ProviderError, SessionError};
pub use session::SessionController;
