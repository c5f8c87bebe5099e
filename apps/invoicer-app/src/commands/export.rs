//! # Export Commands
//!
//! PDF export and registration of the rendered surface used by snapshot mode.
//!
//! ## Export Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Click "Export PDF"                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  export_pdf()                                                           │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Idle → Generating (second click: EXPORT_IN_PROGRESS)       │    │
//! │  │  2. Copy the invoice under the session lock, release it        │    │
//! │  │  3. Pick exporter from config: text | snapshot                 │    │
//! │  │  4. Render (snapshot: await capture, scale on worker)          │    │
//! │  │  5. Write <output_dir>/invoice.pdf atomically                  │    │
//! │  │  6. Generating → Idle (also on failure)                        │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { path, bytes, pages, mode }                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use invoicer_pdf::{
    save_document, DocumentExporter, EncodedImageCapture, ExportMode, SnapshotExporter,
    TextLayoutExporter,
};

use crate::error::{ApiError, AppResult};
use crate::state::{ConfigState, ExportState, SessionState};

/// Where the PDF went.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub path: String,
    pub bytes: usize,
    pub pages: usize,
    pub mode: ExportMode,
}

/// Exports the current invoice as `invoice.pdf`.
///
/// Not gated on `validate_form`: an incomplete form exports as-is.
///
/// ## Errors
/// - `EXPORT_IN_PROGRESS` while another export is generating
/// - `EXPORT_ERROR` for any render or write failure; no file is left behind
pub async fn export_pdf(
    session: &SessionState,
    config: &ConfigState,
    export: &ExportState,
) -> AppResult<ExportReceipt> {
    let _guard = export.try_begin().ok_or_else(ApiError::export_in_progress)?;

    let (session_id, snapshot) = session.with_session(|s| (s.id, s.store().snapshot()));
    let mode = config.export_mode();
    debug!(%session_id, %mode, items = snapshot.items.len(), "export_pdf command");

    let exporter = select_exporter(mode, config, export)?;
    let document = exporter.render(&snapshot).await?;
    let path = save_document(config.output_dir(), &document).await?;

    info!(
        %session_id,
        %mode,
        path = %path.display(),
        pages = document.page_count,
        bytes = document.bytes.len(),
        "Invoice exported"
    );

    Ok(ExportReceipt {
        path: path.display().to_string(),
        bytes: document.bytes.len(),
        pages: document.page_count,
        mode: document.mode,
    })
}

/// Hands over the rendered invoice region (PNG or JPEG bytes) for snapshot
/// export. Replaces any previous registration.
pub fn register_surface(export: &ExportState, image: Vec<u8>) -> AppResult<()> {
    if image.is_empty() {
        return Err(ApiError::invalid_input("Surface image is empty"));
    }
    debug!(bytes = image.len(), "register_surface command");
    export.register_surface(Arc::new(EncodedImageCapture::new(image)));
    Ok(())
}

fn select_exporter(
    mode: ExportMode,
    config: &ConfigState,
    export: &ExportState,
) -> AppResult<Box<dyn DocumentExporter>> {
    match mode {
        ExportMode::TextLayout => Ok(Box::new(TextLayoutExporter::new(config.currency().clone()))),
        ExportMode::Snapshot => {
            let surface = export
                .surface()
                .ok_or_else(|| ApiError::export("No rendered invoice surface is registered"))?;
            Ok(Box::new(SnapshotExporter::new(surface)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::client::update_client_field;
    use crate::commands::items::update_item;
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use async_trait::async_trait;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use invoicer_pdf::{ExportError, ExportResult, SurfaceCapture};
    use std::io::Cursor;
    use std::path::Path;
    use tokio::sync::Notify;

    fn config_for(dir: &Path, mode: ExportMode) -> ConfigState {
        let mut config = AppConfig::default();
        config.export.output_dir = dir.to_path_buf();
        config.export.mode = mode;
        ConfigState::new(config).unwrap()
    }

    fn filled_session(config: &ConfigState) -> SessionState {
        let session = SessionState::new(config.tax_rate());
        update_client_field(&session, "name", "Acme").unwrap();
        update_client_field(&session, "invoiceNumber", "INV-1").unwrap();
        update_item(&session, config, 0, "description", "Widget").unwrap();
        update_item(&session, config, 0, "quantity", "2").unwrap();
        update_item(&session, config, 0, "rate", "100").unwrap();
        session
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([200, 200, 200, 255]),
        ));
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    struct FailingCapture;

    #[async_trait]
    impl SurfaceCapture for FailingCapture {
        async fn capture(&self) -> ExportResult<DynamicImage> {
            Err(ExportError::Capture("surface detached".into()))
        }
    }

    /// Blocks until released, so a test can observe the `Generating` state.
    struct GatedCapture {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SurfaceCapture for GatedCapture {
        async fn capture(&self) -> ExportResult<DynamicImage> {
            self.release.notified().await;
            Ok(DynamicImage::ImageRgba8(RgbaImage::new(10, 10)))
        }
    }

    #[tokio::test]
    async fn test_text_export_writes_invoice_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::TextLayout);
        let session = filled_session(&config);
        let export = ExportState::new();

        let receipt = export_pdf(&session, &config, &export).await.unwrap();

        assert_eq!(receipt.mode, ExportMode::TextLayout);
        assert_eq!(receipt.pages, 1);
        let path = dir.path().join("invoice.pdf");
        assert_eq!(receipt.path, path.display().to_string());
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), receipt.bytes);
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(export.status(), crate::state::ExportStatus::Idle);
    }

    #[tokio::test]
    async fn test_incomplete_form_still_exports() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::TextLayout);
        let session = SessionState::new(config.tax_rate());

        let receipt = export_pdf(&session, &config, &ExportState::new()).await.unwrap();
        assert_eq!(receipt.pages, 1);
    }

    #[tokio::test]
    async fn test_snapshot_export_uses_registered_surface() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::Snapshot);
        let session = filled_session(&config);
        let export = ExportState::new();
        register_surface(&export, png(300, 400)).unwrap();

        let receipt = export_pdf(&session, &config, &export).await.unwrap();
        assert_eq!(receipt.mode, ExportMode::Snapshot);
        assert_eq!(receipt.pages, 1);
        assert!(dir.path().join("invoice.pdf").exists());
    }

    #[tokio::test]
    async fn test_snapshot_without_surface_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::Snapshot);
        let session = filled_session(&config);
        let export = ExportState::new();

        let err = export_pdf(&session, &config, &export).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(!dir.path().join("invoice.pdf").exists());
        assert_eq!(export.status(), crate::state::ExportStatus::Idle);
    }

    #[tokio::test]
    async fn test_failing_capture_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::Snapshot);
        let session = filled_session(&config);
        let export = ExportState::new();
        export.register_surface(Arc::new(FailingCapture));

        let err = export_pdf(&session, &config, &export).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_second_export_is_rejected_while_generating() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), ExportMode::Snapshot);
        let session = filled_session(&config);
        let export = ExportState::new();
        let release = Arc::new(Notify::new());
        export.register_surface(Arc::new(GatedCapture {
            release: Arc::clone(&release),
        }));

        let first = export_pdf(&session, &config, &export);
        let second = async {
            let result = export_pdf(&session, &config, &export).await;
            release.notify_one();
            result
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err().code, ErrorCode::ExportInProgress);
        assert_eq!(export.status(), crate::state::ExportStatus::Idle);
    }

    #[test]
    fn test_register_empty_surface_is_rejected() {
        let export = ExportState::new();
        let err = register_surface(&export, Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(export.surface().is_none());
    }
}
