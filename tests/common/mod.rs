/*!
 * Common test utilities for the signbridge test suite
 */

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tempfile::TempDir;

use signbridge::analyzer::FrameAnalyzer;
use signbridge::app_config::VisionConfig;
use signbridge::database::models::SignLanguageRecord;
use signbridge::database::repository::Repository;
use signbridge::session::SessionController;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// A minimal but valid base64 JPEG payload
pub fn valid_frame() -> String {
    STANDARD.encode([0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46])
}

/// The same payload with the browser's data-URL prefix
pub fn valid_frame_data_url() -> String {
    format!("data:image/jpeg;base64,{}", valid_frame())
}

/// Creates an in-memory repository seeded with one language
pub async fn seeded_repository() -> Result<Repository> {
    let repo = Repository::new_in_memory()?;
    repo.seed_languages(vec![
        SignLanguageRecord::new(
            "ASL",
            "American Sign Language",
            "Used in the United States and parts of Canada",
        ),
        SignLanguageRecord::new("BSL", "British Sign Language", "Used in the United Kingdom"),
    ])
    .await?;
    Ok(repo)
}

/// Creates a demo-mode controller backed by an in-memory database
pub async fn demo_controller() -> Result<SessionController> {
    let repo = seeded_repository().await?;
    let analyzer = FrameAnalyzer::new(&VisionConfig::default());
    Ok(SessionController::new(repo, analyzer, None))
}
