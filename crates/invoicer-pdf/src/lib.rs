//! # invoicer-pdf: Document Export for Invoicer
//!
//! Turns an [`InvoiceSnapshot`](invoicer_core::InvoiceSnapshot) into a PDF and
//! delivers it as `invoice.pdf`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoicer-app ── export_pdf ──┐                                         │
//! │                               ▼                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ invoicer-pdf (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────┐             │   │
//! │  │   │  exporter  │   │   text     │   │  snapshot  │             │   │
//! │  │   │  trait +   │◄──│  layout    │   │  capture + │             │   │
//! │  │   │  mode      │◄──┼────────────┼───│  embed     │             │   │
//! │  │   └─────┬──────┘   └─────┬──────┘   └────────────┘             │   │
//! │  │         │                │ layout: geometry, WinAnsi, assembly │   │
//! │  │         ▼                                                       │   │
//! │  │   ┌────────────┐                                                │   │
//! │  │   │   save     │  atomic write of invoice.pdf                   │   │
//! │  │   └────────────┘                                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                               │                                         │
//! │                        invoicer-core (snapshot, money formatting)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`exporter`] - `DocumentExporter` trait, `ExportMode`, `RenderedDocument`
//! - [`text`] - Text layout strategy (selectable text, paginated)
//! - [`snapshot`] - Rasterized strategy (captured bitmap, width-fitted)
//! - [`layout`] - Page geometry, text encoding, PDF object assembly
//! - [`save`] - Download writer
//! - [`error`] - Export error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use invoicer_core::LineItemStore;
//! use invoicer_pdf::{save_document, DocumentExporter, TextLayoutExporter};
//!
//! # async fn run() -> invoicer_pdf::ExportResult<()> {
//! let store = LineItemStore::default();
//! let document = TextLayoutExporter::default().render(&store.snapshot()).await?;
//! let path = save_document(std::path::Path::new("."), &document).await?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod exporter;
pub mod layout;
pub mod save;
pub mod snapshot;
pub mod text;

pub use error::{ExportError, ExportResult};
pub use exporter::{DocumentExporter, ExportMode, RenderedDocument, INVOICE_FILE_NAME};
pub use save::save_document;
pub use snapshot::{
    EncodedImageCapture, ImageFileCapture, SnapshotExporter, StaticCapture, SurfaceCapture,
};
pub use text::TextLayoutExporter;
