//! # Export Error Types
//!
//! Error types for document generation and delivery.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Capture      │  │    Render       │  │     Delivery            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Capture        │  │  Pdf            │  │  Io                     │ │
//! │  │  EmptySurface   │  │  Image          │  │                         │ │
//! │  │                 │  │  Worker         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant means the same thing to the user: the PDF was not produced.
//! None of them leave a partial file behind.

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Export error type covering all possible export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    // =========================================================================
    // Capture Errors
    // =========================================================================
    /// The host could not provide a rendered region.
    #[error("Surface capture failed: {0}")]
    Capture(String),

    /// The captured bitmap has no pixels.
    #[error("Captured surface is empty ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    // =========================================================================
    // Render Errors
    // =========================================================================
    /// The invoice holds an infinite or NaN amount and cannot be printed.
    #[error("Invoice has a non-finite {0}")]
    NonFiniteAmount(String),

    /// Bitmap decoding failed.
    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),

    /// PDF object construction or serialization failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// The blocking render task panicked or was cancelled by the runtime.
    #[error("Render worker failed: {0}")]
    Worker(String),

    // =========================================================================
    // Delivery Errors
    // =========================================================================
    /// Writing the file failed.
    #[error("File write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExportError::Worker(err.to_string())
    }
}

impl ExportError {
    /// Wraps any lopdf failure (object model or writer).
    pub(crate) fn pdf(err: impl std::fmt::Display) -> Self {
        ExportError::Pdf(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ExportError::EmptySurface {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Captured surface is empty (0x10)");

        let err = ExportError::pdf("bad xref");
        assert_eq!(err.to_string(), "PDF generation failed: bad xref");
    }

    #[test]
    fn test_io_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ExportError = io.into();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
