/*!
 * Error types for the signbridge application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a vision provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by the frame analyzer
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The submitted frame payload could not be decoded
    #[error("Invalid frame data: {0}")]
    InvalidFrameData(String),

    /// The vision provider failed or timed out; recoverable into a
    /// soft "no detection" result by the caller
    #[error("Analysis unavailable: {0}")]
    AnalysisUnavailable(String),
}

impl From<ProviderError> for AnalyzerError {
    fn from(error: ProviderError) -> Self {
        Self::AnalysisUnavailable(error.to_string())
    }
}

/// Errors raised by the session controller
#[derive(Error, Debug)]
pub enum SessionError {
    /// Analyze-frame was called without an active session
    #[error("No active session: {0}")]
    NoActiveSession(String),

    /// The referenced session does not exist
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Feedback rating outside the accepted 1-5 range
    #[error("Invalid rating: {0} (must be between 1 and 5)")]
    InvalidRating(i64),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the frame analyzer
    #[error("Analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    /// Error from the session controller
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a database operation
    #[error("Database error: {0}")]
    Database(String),

    /// Caller is not authenticated or unknown
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
