/*!
 * Unit tests for error types and conversions
 */

use signbridge::errors::{AnalyzerError, AppError, ProviderError, SessionError};

#[test]
fn test_providerError_intoAnalyzerError_shouldBecomeUnavailable() {
    let err: AnalyzerError = ProviderError::RequestFailed("timeout".to_string()).into();
    assert!(matches!(err, AnalyzerError::AnalysisUnavailable(_)));
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn test_analyzerError_intoAppError_shouldWrap() {
    let err: AppError = AnalyzerError::InvalidFrameData("bad padding".to_string()).into();
    assert!(matches!(
        err,
        AppError::Analyzer(AnalyzerError::InvalidFrameData(_))
    ));
}

#[test]
fn test_sessionError_invalidRating_shouldMentionRange() {
    let err = SessionError::InvalidRating(0);
    assert!(err.to_string().contains("between 1 and 5"));
}

#[test]
fn test_anyhowError_intoAppError_shouldBecomeUnknown() {
    let err: AppError = anyhow::anyhow!("something broke").into();
    assert!(matches!(err, AppError::Unknown(_)));
}

#[test]
fn test_apiError_display_shouldIncludeStatusCode() {
    let err = ProviderError::ApiError {
        status_code: 429,
        message: "quota exceeded".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("429"));
    assert!(text.contains("quota exceeded"));
}
