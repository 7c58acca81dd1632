/*!
 * Frame analyzer: turns one captured camera frame into a recognition result.
 *
 * The analyzer decodes the base64 payload, hands the JPEG bytes to the
 * configured vision provider and tags the result with its origin. Whether
 * the live API or the canned demo set is used is decided once, at
 * construction time, from the presence of an API key.
 */

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::app_config::VisionConfig;
use crate::database::RecognitionSource;
use crate::errors::AnalyzerError;
use crate::providers::{DemoProvider, Gemini, RecognitionRequest, SignRecognition, VisionProvider};

/// A recognition result tagged with its origin
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// The structured recognition from the provider
    pub recognition: SignRecognition,
    /// Where the result came from (live or demo)
    pub source: RecognitionSource,
}

/// Analyzes single frames against a vision provider
#[derive(Clone)]
pub struct FrameAnalyzer {
    /// The provider chosen at construction time
    provider: Arc<dyn VisionProvider>,
    /// Whether this analyzer runs in demo mode
    demo_mode: bool,
}

impl FrameAnalyzer {
    /// Create an analyzer from the vision configuration
    ///
    /// An empty API key selects the demo provider; anything else selects
    /// the live Gemini client.
    pub fn new(config: &VisionConfig) -> Self {
        if config.is_demo_mode() {
            warn!("No vision API key configured, running in demo mode with canned responses");
            Self {
                provider: Arc::new(DemoProvider::new()),
                demo_mode: true,
            }
        } else {
            info!("Frame analyzer using live vision model: {}", config.model);
            Self {
                provider: Arc::new(Gemini::new(
                    config.api_key.clone(),
                    config.model.clone(),
                    config.endpoint.clone(),
                    config.timeout_secs,
                )),
                demo_mode: false,
            }
        }
    }

    /// Create an analyzer around an explicit provider (for testing)
    pub fn with_provider(provider: Arc<dyn VisionProvider>, demo_mode: bool) -> Self {
        Self { provider, demo_mode }
    }

    /// Whether this analyzer returns canned demo responses
    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Short identifier of the underlying provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Decode a base64 frame payload, tolerating a data-URL prefix
    pub fn decode_frame(frame_base64: &str) -> Result<Vec<u8>, AnalyzerError> {
        // Browsers send "data:image/jpeg;base64,<payload>"
        let payload = match frame_base64.split_once(',') {
            Some((_, rest)) => rest,
            None => frame_base64,
        };

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AnalyzerError::InvalidFrameData(e.to_string()))?;

        if bytes.is_empty() {
            return Err(AnalyzerError::InvalidFrameData(
                "Empty frame payload".to_string(),
            ));
        }

        Ok(bytes)
    }

    /// Analyze one frame and return the tagged recognition
    ///
    /// Persistence is the caller's responsibility; this method has no side
    /// effects beyond the outbound provider call.
    pub async fn analyze(
        &self,
        frame_base64: &str,
        language_code: &str,
    ) -> Result<FrameAnalysis, AnalyzerError> {
        let frame_jpeg = Self::decode_frame(frame_base64)?;

        debug!(
            "Analyzing {} byte frame for {} via {}",
            frame_jpeg.len(),
            language_code,
            self.provider.name()
        );

        let mut recognition = self
            .provider
            .recognize(RecognitionRequest {
                frame_jpeg,
                language_code: language_code.to_string(),
            })
            .await?;

        // Providers self-report confidence; never trust it outside [0, 1]
        recognition.confidence_score = recognition.confidence_score.clamp(0.0, 1.0);

        let source = if self.demo_mode {
            debug!("Demo recognition: {}", recognition.detected_sign);
            RecognitionSource::Demo
        } else {
            RecognitionSource::Live
        };

        Ok(FrameAnalysis { recognition, source })
    }

    /// Test connectivity to the underlying provider
    pub async fn test_connection(&self) -> Result<(), AnalyzerError> {
        self.provider.test_connection().await.map_err(Into::into)
    }
}
