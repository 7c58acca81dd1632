/*!
 * Google Gemini Vision API client.
 *
 * Sends the captured frame inline (base64 JPEG) together with an
 * interpretation prompt to the generateContent endpoint and parses the
 * model's JSON reply into a structured recognition.
 */

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RecognitionRequest, SignRecognition, VisionProvider};
use crate::errors::ProviderError;

/// Gemini client for interacting with the Google Gemini Vision API
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// Model name (e.g. "gemini-1.5-flash")
    model: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
}

impl std::fmt::Debug for Gemini {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the API key
        f.debug_struct("Gemini")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
struct GeminiRequest {
    /// The conversation content blocks
    contents: Vec<GeminiContent>,
}

/// A single content block with its parts
#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

/// One part of a content block: either text or inline image data
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum GeminiPart {
    #[serde(rename = "text")]
    Text(String),
    InlineData {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data: String,
    },
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    /// Generated candidates (usually one)
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// A single response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

/// The content of a candidate
#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

/// One part of a response content block
#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the instruction prompt for a sign language code
    fn build_prompt(language_code: &str) -> String {
        format!(
            r#"You are an expert {language_code} (Sign Language) interpreter.
Analyze this image carefully and identify any hand gestures or sign language being performed.

Return a JSON object with ONLY these keys:
- "detected_sign": the name of the sign or gesture (e.g. "Hello", "Thank You", "A", "Love")
- "translated_text": a natural English sentence or word that conveys the meaning
- "confidence_score": a float between 0 and 1 representing your confidence
- "description": brief description of the hand position observed

If no sign language gesture is detected, return:
{{"detected_sign": "None", "translated_text": "No sign detected", "confidence_score": 0.0, "description": "No hand gesture visible"}}

Respond ONLY with valid JSON, no markdown."#
        )
    }

    /// Send a generateContent request and return the raw model text
    async fn generate(&self, request: GeminiRequest) -> Result<String, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                self.model
            )
        } else {
            format!(
                "{}/v1beta/models/{}:generateContent",
                self.endpoint.trim_end_matches('/'),
                self.model
            )
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let gemini_response = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(Self::extract_text_from_response(&gemini_response))
    }

    /// Extract concatenated text parts from a Gemini response
    fn extract_text_from_response(response: &GeminiResponse) -> String {
        response
            .candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .map(|p| p.text.as_str())
            .collect()
    }

    /// Strip markdown code fences the model sometimes wraps around JSON
    fn strip_code_fences(text: &str) -> &str {
        let trimmed = text.trim();
        if let Some(rest) = trimmed.strip_prefix("```") {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            let rest = rest.trim_start_matches(['\r', '\n']);
            return rest.split("```").next().unwrap_or(rest).trim();
        }
        trimmed
    }

    /// Parse the model's JSON reply into a structured recognition
    fn parse_recognition(text: &str) -> Result<SignRecognition, ProviderError> {
        let cleaned = Self::strip_code_fences(text);
        serde_json::from_str(cleaned).map_err(|e| {
            ProviderError::ParseError(format!("Invalid recognition JSON: {} in {:?}", e, cleaned))
        })
    }
}

#[async_trait]
impl VisionProvider for Gemini {
    async fn recognize(&self, request: RecognitionRequest) -> Result<SignRecognition, ProviderError> {
        let prompt = Self::build_prompt(&request.language_code);

        let gemini_request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart::Text(prompt),
                    GeminiPart::InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: STANDARD.encode(&request.frame_jpeg),
                    },
                ],
            }],
        };

        let text = self.generate(gemini_request).await?;
        Self::parse_recognition(&text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart::Text("Hello".to_string())],
            }],
        };

        self.generate(request).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
