/*!
 * Unit tests for the frame analyzer
 */

use anyhow::Result;
use std::sync::Arc;

use signbridge::analyzer::FrameAnalyzer;
use signbridge::app_config::VisionConfig;
use signbridge::database::models::RecognitionSource;
use signbridge::errors::AnalyzerError;

use crate::common;
use crate::common::mock_providers::{ScriptedProvider, UnavailableProvider};

#[test]
fn test_decodeFrame_withDataUrl_shouldDecode() -> Result<()> {
    let bytes = FrameAnalyzer::decode_frame(&common::valid_frame_data_url())?;
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    Ok(())
}

#[test]
fn test_decodeFrame_withBarePayload_shouldDecode() -> Result<()> {
    let bytes = FrameAnalyzer::decode_frame(&common::valid_frame())?;
    assert!(!bytes.is_empty());
    Ok(())
}

#[test]
fn test_decodeFrame_withGarbage_shouldFail() {
    let result = FrameAnalyzer::decode_frame("!!definitely not base64!!");
    assert!(matches!(result, Err(AnalyzerError::InvalidFrameData(_))));
}

#[tokio::test]
async fn test_analyze_withScriptedProvider_shouldTagLive() -> Result<()> {
    let analyzer = FrameAnalyzer::with_provider(Arc::new(ScriptedProvider::hello()), false);

    let analysis = analyzer.analyze(&common::valid_frame(), "ASL").await?;
    assert_eq!(analysis.source, RecognitionSource::Live);
    assert_eq!(analysis.recognition.detected_sign, "Hello");
    Ok(())
}

#[tokio::test]
async fn test_analyze_withUnavailableProvider_shouldReturnUnavailable() {
    let analyzer = FrameAnalyzer::with_provider(Arc::new(UnavailableProvider), false);

    let result = analyzer.analyze(&common::valid_frame(), "ASL").await;
    assert!(matches!(
        result,
        Err(AnalyzerError::AnalysisUnavailable(_))
    ));
}

#[tokio::test]
async fn test_analyze_demoMode_confidenceAlwaysInUnitRange() -> Result<()> {
    let analyzer = FrameAnalyzer::new(&VisionConfig::default());

    for _ in 0..10 {
        let analysis = analyzer.analyze(&common::valid_frame(), "BSL").await?;
        assert!((0.0..=1.0).contains(&analysis.recognition.confidence_score));
        assert_eq!(analysis.source, RecognitionSource::Demo);
    }
    Ok(())
}
