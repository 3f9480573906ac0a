//! Document export
//!
//! Writes a document's text to a plain file, the server-side counterpart of
//! saving a download from the browser.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the exported file
pub const EXPORT_FILE_NAME: &str = "document.txt";

/// Write `content` to `document.txt` inside `dir`, replacing any previous export
pub async fn export_document(dir: &Path, content: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(EXPORT_FILE_NAME);
    tokio::fs::write(&path, content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Exported document to {}", path.display());
    Ok(path)
}
