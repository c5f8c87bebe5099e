//! # Exporter Strategy
//!
//! The seam between the invoice state and the two ways of producing a PDF.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Export Strategies                                    │
//! │                                                                         │
//! │                    ┌────────────────────────┐                           │
//! │  InvoiceSnapshot ─►│  dyn DocumentExporter  │─► RenderedDocument        │
//! │                    └───────────┬────────────┘                           │
//! │                ┌───────────────┴───────────────┐                        │
//! │                ▼                               ▼                        │
//! │   TextLayoutExporter               SnapshotExporter                     │
//! │   • synchronous work               • awaits a SurfaceCapture            │
//! │   • selectable text                • image-only page (not searchable)   │
//! │   • paginates                      • single page, width-fitted          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Which one runs is decided by configuration ([`ExportMode`]).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use invoicer_core::InvoiceSnapshot;

use crate::error::ExportResult;

/// File name every export is delivered under.
pub const INVOICE_FILE_NAME: &str = "invoice.pdf";

// =============================================================================
// Export Mode
// =============================================================================

/// Which exporter to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportMode {
    /// Text and table primitives placed at computed coordinates.
    #[default]
    #[serde(rename = "text")]
    TextLayout,

    /// A captured bitmap of the rendered invoice embedded as one image.
    #[serde(rename = "snapshot")]
    Snapshot,
}

impl ExportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExportMode::TextLayout => "text",
            ExportMode::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "layout" | "text-layout" => Ok(ExportMode::TextLayout),
            "snapshot" | "raster" | "image" => Ok(ExportMode::Snapshot),
            _ => Err(format!("Unknown export mode: {}", s)),
        }
    }
}

// =============================================================================
// Rendered Document
// =============================================================================

/// A finished PDF, ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// Always [`INVOICE_FILE_NAME`]
    pub file_name: String,

    /// Serialized PDF
    pub bytes: Vec<u8>,

    /// Number of pages in the document
    pub page_count: usize,

    /// Strategy that produced it
    pub mode: ExportMode,
}

impl RenderedDocument {
    pub(crate) fn new(bytes: Vec<u8>, page_count: usize, mode: ExportMode) -> Self {
        RenderedDocument {
            file_name: INVOICE_FILE_NAME.to_string(),
            bytes,
            page_count,
            mode,
        }
    }
}

// =============================================================================
// Strategy Trait
// =============================================================================

/// Produces a PDF from an invoice snapshot.
///
/// Implementations must not leave anything behind on failure; writing to
/// disk is a separate step ([`crate::save::save_document`]).
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// The strategy this exporter implements.
    fn mode(&self) -> ExportMode;

    /// Renders the snapshot into PDF bytes.
    async fn render(&self, snapshot: &InvoiceSnapshot) -> ExportResult<RenderedDocument>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_mode_parsing() {
        assert_eq!("text".parse::<ExportMode>().unwrap(), ExportMode::TextLayout);
        assert_eq!("Snapshot".parse::<ExportMode>().unwrap(), ExportMode::Snapshot);
        assert_eq!("raster".parse::<ExportMode>().unwrap(), ExportMode::Snapshot);
        assert!("fax".parse::<ExportMode>().is_err());
    }

    #[test]
    fn test_export_mode_display_matches_serde() {
        for mode in [ExportMode::TextLayout, ExportMode::Snapshot] {
            let parsed: ExportMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
        assert_eq!(ExportMode::default(), ExportMode::TextLayout);
    }
}
