/*!
 * Optional on-disk storage for frame snapshots.
 *
 * When a frames directory is configured, each analyzed frame is written
 * once under a content-addressed name and the relative filename is kept
 * on the translation record. Identical frames share one file.
 */

use anyhow::{Context, Result};
use log::debug;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Stores JPEG frame snapshots under a configured directory
#[derive(Debug, Clone)]
pub struct FrameStore {
    /// Directory snapshots are written to
    dir: PathBuf,
}

impl FrameStore {
    /// Create a frame store, ensuring the directory exists
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create frames directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// The directory snapshots are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a frame snapshot and return its relative filename
    pub async fn store(&self, frame_jpeg: Vec<u8>) -> Result<String> {
        let dir = self.dir.clone();

        tokio::task::spawn_blocking(move || {
            let mut hasher = Sha256::new();
            hasher.update(&frame_jpeg);
            let hash = format!("{:x}", hasher.finalize());

            let filename = format!("frame_{}.jpg", &hash[..16]);
            let path = dir.join(&filename);

            if !path.exists() {
                std::fs::write(&path, &frame_jpeg)
                    .with_context(|| format!("Failed to write frame snapshot: {}", path.display()))?;
                debug!("Stored frame snapshot {}", filename);
            }

            Ok(filename)
        })
        .await
        .context("Frame snapshot task panicked")?
    }
}
