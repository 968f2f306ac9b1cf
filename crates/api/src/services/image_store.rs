//! File storage for decoded snapshot uploads.

use chrono::{NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Writes decoded image payloads into the configured upload directory.
///
/// Files are named from the server receive time (`cow_YYYYmmdd_HHMMSS.jpg`),
/// matching the layout the dashboard links against. The directory is created
/// on first use.
#[derive(Debug, Clone)]
pub struct ImageStore {
    upload_dir: PathBuf,
}

/// Result of a successful file write.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Bare file name, e.g. `cow_20240501_120000.jpg`.
    pub filename: String,
    /// Location persisted in the `image_path` column: the configured upload
    /// directory joined with the file name, forward slashes. Relative exactly
    /// when the configured directory is.
    pub image_path: String,
}

impl ImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    /// Builds the file name for an upload received at `received_at`.
    pub fn filename_for(received_at: NaiveDateTime) -> String {
        format!("cow_{}.jpg", received_at.format("%Y%m%d_%H%M%S"))
    }

    /// Writes `bytes` to a new file named from the current server time.
    ///
    /// Creates the upload directory if absent. Near-simultaneous uploads in
    /// the same second overwrite each other's file; the accepted leniency of
    /// timestamp-derived names.
    pub async fn save(&self, bytes: &[u8]) -> std::io::Result<StoredImage> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;

        let filename = Self::filename_for(Utc::now().naive_utc());
        let path = self.upload_dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        Ok(StoredImage {
            image_path: path_for_db(&path),
            filename,
        })
    }

    /// Compensating action: removes a file written by `save` after a failed
    /// row insert, so no orphaned file is left behind.
    pub async fn remove(&self, filename: &str) {
        let path = self.upload_dir.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!(file = %path.display(), "Failed to remove orphaned upload: {}", e);
        }
    }
}

fn path_for_db(path: &Path) -> String {
    // Forward slashes regardless of platform so the dashboard can use the
    // value as a URL path
    path.to_string_lossy().replace('\\', "/")
}
