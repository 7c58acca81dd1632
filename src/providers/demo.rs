/*!
 * Demo provider returning canned recognition results.
 *
 * Used when no vision API key is configured. This is a deliberate fallback,
 * not an error path: the capture-and-speak loop keeps working end to end,
 * and every result is tagged as demo-sourced by the analyzer.
 */

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use super::{RecognitionRequest, SignRecognition, VisionProvider};
use crate::errors::ProviderError;

/// The fixed demo set: sign, translation, confidence, hand-position note
const DEMO_SIGNS: [(&str, &str, f64, &str); 5] = [
    ("Hello", "Hello!", 0.92, "Open hand wave near face"),
    ("Thank You", "Thank you very much.", 0.88, "Hand moves away from chin"),
    ("Help", "Please help me.", 0.85, "Thumbs up on flat palm"),
    ("Yes", "Yes.", 0.95, "Fist nodding motion"),
    ("Love", "I love you.", 0.90, "ILY handshape"),
];

/// Vision provider that picks a pseudo-random canned response per frame
#[derive(Debug, Clone, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Create a new demo provider
    pub fn new() -> Self {
        Self
    }

    /// The full canned response set, for display and tests
    pub fn demo_set() -> Vec<SignRecognition> {
        DEMO_SIGNS
            .iter()
            .map(|(sign, text, confidence, description)| SignRecognition {
                detected_sign: sign.to_string(),
                translated_text: text.to_string(),
                confidence_score: *confidence,
                description: description.to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl VisionProvider for DemoProvider {
    async fn recognize(&self, _request: RecognitionRequest) -> Result<SignRecognition, ProviderError> {
        let (sign, text, confidence, description) = DEMO_SIGNS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(DEMO_SIGNS[0]);

        Ok(SignRecognition {
            detected_sign: sign.to_string(),
            translated_text: text.to_string(),
            confidence_score: confidence,
            description: description.to_string(),
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        // Nothing to reach
        Ok(())
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}
