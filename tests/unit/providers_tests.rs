/*!
 * Unit tests for vision providers
 */

use anyhow::Result;
use signbridge::providers::{DemoProvider, RecognitionRequest, SignRecognition, VisionProvider};

use crate::common::mock_providers::ScriptedProvider;

fn request() -> RecognitionRequest {
    RecognitionRequest {
        frame_jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
        language_code: "ASL".to_string(),
    }
}

#[tokio::test]
async fn test_demoProvider_shouldReturnMemberOfFixedSet() -> Result<()> {
    let provider = DemoProvider::new();
    let set = DemoProvider::demo_set();

    for _ in 0..20 {
        let recognition = provider.recognize(request()).await?;
        assert!(
            set.iter().any(|s| s.detected_sign == recognition.detected_sign
                && s.translated_text == recognition.translated_text),
            "Unexpected demo recognition: {}",
            recognition.detected_sign
        );
        assert!((0.0..=1.0).contains(&recognition.confidence_score));
    }
    Ok(())
}

#[tokio::test]
async fn test_demoProvider_testConnection_shouldAlwaysSucceed() -> Result<()> {
    let provider = DemoProvider::new();
    provider.test_connection().await?;
    assert_eq!(provider.name(), "demo");
    Ok(())
}

#[test]
fn test_noDetection_shouldBeZeroConfidence() {
    let recognition = SignRecognition::no_detection();
    assert_eq!(recognition.detected_sign, "None");
    assert_eq!(recognition.confidence_score, 0.0);
    assert!(!recognition.translated_text.is_empty());
}

#[tokio::test]
async fn test_scriptedProvider_shouldTrackCalls() -> Result<()> {
    let provider = ScriptedProvider::hello();
    let tracker = provider.tracker();

    provider.recognize(request()).await?;
    provider.recognize(request()).await?;

    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 2);
    assert_eq!(tracker.last_language.as_deref(), Some("ASL"));
    assert_eq!(tracker.last_frame_len, 4);
    Ok(())
}

#[test]
fn test_signRecognition_shouldDeserializeFromModelReply() -> Result<()> {
    let json = r#"{
        "detected_sign": "Thank You",
        "translated_text": "Thank you very much",
        "confidence_score": 0.88,
        "description": "Flat hand moving from chin outward"
    }"#;

    let recognition: SignRecognition = serde_json::from_str(json)?;
    assert_eq!(recognition.detected_sign, "Thank You");
    assert_eq!(recognition.confidence_score, 0.88);
    Ok(())
}

#[test]
fn test_signRecognition_withoutDescription_shouldDefaultEmpty() -> Result<()> {
    let json = r#"{"detected_sign": "Yes", "translated_text": "Yes", "confidence_score": 0.5}"#;
    let recognition: SignRecognition = serde_json::from_str(json)?;
    assert!(recognition.description.is_empty());
    Ok(())
}
