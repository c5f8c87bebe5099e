//! # Snapshot Exporter
//!
//! Rasterized export: whatever the host rendered is captured as a bitmap and
//! embedded as a single image, fitted to the page width.
//!
//! ## Pipeline
//! ```text
//! ┌──────────────┐   await    ┌──────────────┐  spawn_blocking  ┌──────────────┐
//! │ SurfaceCapture│──────────►│ DynamicImage │─────────────────►│ downsample   │
//! │ (host bitmap) │           └──────────────┘                  │ flatten alpha│
//! └──────────────┘                                              │ embed XObject│
//!                                                               └──────┬───────┘
//!                                                                      ▼
//!                                                               RenderedDocument
//! ```
//!
//! The result is an image: text in it cannot be selected or searched. A
//! bitmap taller than A4 at page width makes the page taller instead of
//! being clipped.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbImage};
use lopdf::content::Operation;
use lopdf::{dictionary, Stream};
use tracing::debug;

use invoicer_core::InvoiceSnapshot;

use crate::error::{ExportError, ExportResult};
use crate::exporter::{DocumentExporter, ExportMode, RenderedDocument};
use crate::layout::{PdfAssembler, A4_HEIGHT_PT, A4_WIDTH_PT};
use crate::text::document_title;

/// Bitmaps wider than this are downsampled before embedding (~144 dpi at A4).
pub const MAX_PIXEL_WIDTH: u32 = 1190;

// =============================================================================
// Surface Capture
// =============================================================================

/// Source of the rendered invoice region.
#[async_trait]
pub trait SurfaceCapture: Send + Sync {
    async fn capture(&self) -> ExportResult<DynamicImage>;
}

/// Encoded PNG/JPEG bytes handed over by the host (e.g. a webview screenshot).
#[derive(Debug, Clone)]
pub struct EncodedImageCapture {
    bytes: Arc<[u8]>,
}

impl EncodedImageCapture {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        EncodedImageCapture {
            bytes: Arc::from(bytes.into()),
        }
    }
}

#[async_trait]
impl SurfaceCapture for EncodedImageCapture {
    async fn capture(&self) -> ExportResult<DynamicImage> {
        let bytes = Arc::clone(&self.bytes);
        let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
        Ok(image)
    }
}

/// An image file the host wrote to disk.
#[derive(Debug, Clone)]
pub struct ImageFileCapture {
    path: PathBuf,
}

impl ImageFileCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ImageFileCapture { path: path.into() }
    }
}

#[async_trait]
impl SurfaceCapture for ImageFileCapture {
    async fn capture(&self) -> ExportResult<DynamicImage> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ExportError::Capture(format!("{}: {}", self.path.display(), e))
        })?;
        EncodedImageCapture::new(bytes).capture().await
    }
}

/// An already-decoded bitmap.
#[derive(Debug, Clone)]
pub struct StaticCapture {
    image: DynamicImage,
}

impl StaticCapture {
    pub fn new(image: DynamicImage) -> Self {
        StaticCapture { image }
    }
}

#[async_trait]
impl SurfaceCapture for StaticCapture {
    async fn capture(&self) -> ExportResult<DynamicImage> {
        Ok(self.image.clone())
    }
}

// =============================================================================
// Placement
// =============================================================================

/// Where the bitmap lands on the page, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: f32,
    pub height: f32,
    pub page_height: i64,
}

/// Scales a `px_width × px_height` bitmap to `page_width`, keeping the
/// aspect ratio. The page is at least A4 tall and grows to fit.
pub fn fit_to_width(px_width: u32, px_height: u32, page_width: i64) -> Placement {
    let width = page_width as f32;
    let height = width * px_height as f32 / px_width.max(1) as f32;
    Placement {
        width,
        height,
        page_height: (height.ceil() as i64).max(A4_HEIGHT_PT),
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// Renders an invoice by embedding a captured bitmap.
#[derive(Clone)]
pub struct SnapshotExporter {
    capture: Arc<dyn SurfaceCapture>,
    page_width: i64,
    max_pixel_width: u32,
}

impl SnapshotExporter {
    pub fn new(capture: Arc<dyn SurfaceCapture>) -> Self {
        SnapshotExporter {
            capture,
            page_width: A4_WIDTH_PT,
            max_pixel_width: MAX_PIXEL_WIDTH,
        }
    }

    pub fn with_max_pixel_width(mut self, max_pixel_width: u32) -> Self {
        self.max_pixel_width = max_pixel_width.max(1);
        self
    }
}

impl std::fmt::Debug for SnapshotExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotExporter")
            .field("page_width", &self.page_width)
            .field("max_pixel_width", &self.max_pixel_width)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DocumentExporter for SnapshotExporter {
    fn mode(&self) -> ExportMode {
        ExportMode::Snapshot
    }

    async fn render(&self, snapshot: &InvoiceSnapshot) -> ExportResult<RenderedDocument> {
        let image = self.capture.capture().await?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ExportError::EmptySurface { width, height });
        }

        let title = document_title(snapshot);
        let page_width = self.page_width;
        let max_pixel_width = self.max_pixel_width;

        let bytes = tokio::task::spawn_blocking(move || {
            let pixels = prepare_pixels(image, max_pixel_width);
            embed_image(&pixels, page_width, &title)
        })
        .await??;

        debug!(
            px_width = width,
            px_height = height,
            bytes = bytes.len(),
            "Snapshot rendered"
        );

        Ok(RenderedDocument::new(bytes, 1, ExportMode::Snapshot))
    }
}

/// Downsamples to `max_width` and flattens transparency onto white.
fn prepare_pixels(image: DynamicImage, max_width: u32) -> RgbImage {
    let image = if image.width() > max_width {
        let height = (u64::from(image.height()) * u64::from(max_width) / u64::from(image.width()))
            .max(1) as u32;
        image.resize_exact(max_width, height, FilterType::Triangle)
    } else {
        image
    };

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let over_white = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha)) / 255) as u8;
        image::Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

fn embed_image(pixels: &RgbImage, page_width: i64, title: &str) -> ExportResult<Vec<u8>> {
    let placement = fit_to_width(pixels.width(), pixels.height(), page_width);

    let mut pdf = PdfAssembler::new();
    let image_id = pdf.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(pixels.width()),
            "Height" => i64::from(pixels.height()),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        pixels.as_raw().clone(),
    ));

    let top = placement.page_height as f32 - placement.height;
    let operations = vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                placement.width.into(),
                0.into(),
                0.into(),
                placement.height.into(),
                0.into(),
                top.into(),
            ],
        ),
        Operation::new("Do", vec!["Im1".into()]),
        Operation::new("Q", vec![]),
    ];

    let resources = dictionary! {
        "XObject" => dictionary! { "Im1" => image_id },
    };
    pdf.add_page(page_width, placement.page_height, resources, operations)?;
    pdf.finish(title, true)
}
