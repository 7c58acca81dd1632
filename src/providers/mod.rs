/*!
 * Provider implementations for sign-gesture recognition.
 *
 * This module contains client implementations for the vision backends:
 * - Gemini: Google Gemini Vision API
 * - Demo: canned recognition results used when no API key is configured
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A single frame submitted for recognition
#[derive(Debug, Clone)]
pub struct RecognitionRequest {
    /// Decoded JPEG bytes of the captured frame
    pub frame_jpeg: Vec<u8>,
    /// Sign language code the interpreter should assume (e.g. "ASL")
    pub language_code: String,
}

/// Structured recognition result returned by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRecognition {
    /// The name of the sign or gesture (e.g. "Hello", "Thank You")
    pub detected_sign: String,
    /// A natural sentence or word conveying the meaning
    pub translated_text: String,
    /// Model confidence between 0 and 1 (unclamped provider output)
    pub confidence_score: f64,
    /// Brief description of the hand position observed
    #[serde(default)]
    pub description: String,
}

impl SignRecognition {
    /// The result a provider reports when no gesture is visible
    pub fn no_detection() -> Self {
        Self {
            detected_sign: "None".to_string(),
            translated_text: "No sign detected".to_string(),
            confidence_score: 0.0,
            description: "No hand gesture visible".to_string(),
        }
    }
}

/// Common trait for all vision providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the frame analyzer.
#[async_trait]
pub trait VisionProvider: Send + Sync + Debug {
    /// Recognize the sign performed in a single frame
    ///
    /// # Arguments
    /// * `request` - The frame and language context to analyze
    ///
    /// # Returns
    /// * `Result<SignRecognition, ProviderError>` - The recognition or an error
    async fn recognize(&self, request: RecognitionRequest) -> Result<SignRecognition, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Short provider identifier used in logs and metadata
    fn name(&self) -> &'static str;
}

pub mod demo;
pub mod gemini;

pub use demo::DemoProvider;
pub use gemini::Gemini;
