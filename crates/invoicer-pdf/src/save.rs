//! # Download Writer
//!
//! Delivers a rendered document as `<dir>/invoice.pdf`.
//!
//! ```text
//! bytes ──► invoice.pdf.part ──(fsync)──► rename ──► invoice.pdf
//!                 │
//!                 └── any failure: .part removed, existing invoice.pdf untouched
//! ```

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::ExportResult;
use crate::exporter::RenderedDocument;

/// Writes the document into `dir`, replacing any previous export.
///
/// Returns the final path.
pub async fn save_document(dir: &Path, document: &RenderedDocument) -> ExportResult<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let target = dir.join(&document.file_name);
    let partial = dir.join(format!("{}.part", document.file_name));

    if let Err(err) = write_partial(&partial, &document.bytes).await {
        discard(&partial).await;
        return Err(err);
    }
    if let Err(err) = tokio::fs::rename(&partial, &target).await {
        discard(&partial).await;
        return Err(err.into());
    }

    debug!(path = %target.display(), bytes = document.bytes.len(), "Document saved");
    Ok(target)
}

async fn write_partial(path: &Path, bytes: &[u8]) -> ExportResult<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

async fn discard(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %err, "Failed to remove partial file");
        }
    }
}
