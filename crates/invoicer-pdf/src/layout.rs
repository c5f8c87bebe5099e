//! # Page Layout
//!
//! Page geometry, text encoding and the low-level document assembly shared by
//! both exporters.
//!
//! ## Coordinate System
//! ```text
//!  PDF user space (points, 1/72 in)         Layout cursor
//!
//!  (0,842) ┌───────────────────┐            cursor = 0   (top edge)
//!          │ Invoice           │            cursor = 28  (first baseline)
//!          │ Client Name: ...  │              │ += line_height per line
//!          │ ...               │              ▼
//!          │                   │            cursor > 842 - margin_bottom
//!          │                   │              → new page, cursor = margin_top
//!  (0,0)   └───────────────────┘ (595,0)
//!
//!  baseline y = page_height - cursor
//! ```
//!
//! Coordinates are whole points. The default geometry is a 10 mm margin and
//! a 7 mm line pitch on A4.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, StringFormat};

use crate::error::{ExportError, ExportResult};

/// A4 width in points.
pub const A4_WIDTH_PT: i64 = 595;

/// A4 height in points.
pub const A4_HEIGHT_PT: i64 = 842;

// =============================================================================
// Geometry
// =============================================================================

/// Geometry and typography of the text layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: i64,
    pub page_height: i64,

    /// Baseline of the first line on every page.
    pub margin_top: i64,
    /// Nothing is drawn below `page_height - margin_bottom`.
    pub margin_bottom: i64,
    pub margin_left: i64,

    /// Vertical advance per text line.
    pub line_height: i64,
    /// Extra space between blocks (client block, table, totals).
    pub section_gap: i64,

    /// X of the centred-ish "Invoice" title.
    pub title_x: i64,
    /// Column origins of the item table; description starts at `margin_left`.
    pub qty_x: i64,
    pub rate_x: i64,
    pub amount_x: i64,

    pub title_size: i64,
    pub heading_size: i64,
    pub body_size: i64,

    /// Wrap width of the description column, in characters.
    pub description_chars: usize,
    /// Wrap width of full-width lines (client block), in characters.
    pub line_chars: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout {
            page_width: A4_WIDTH_PT,
            page_height: A4_HEIGHT_PT,
            margin_top: 28,
            margin_bottom: 40,
            margin_left: 28,
            line_height: 20,
            section_gap: 28,
            title_x: 255,
            qty_x: 227,
            rate_x: 283,
            amount_x: 369,
            title_size: 18,
            heading_size: 14,
            body_size: 12,
            description_chars: 30,
            line_chars: 80,
        }
    }
}

/// Font faces registered on every text page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

// =============================================================================
// Text Encoding
// =============================================================================

/// Encodes text for the built-in fonts (WinAnsiEncoding).
///
/// Latin-1 maps straight through, a handful of typographic characters map to
/// their WinAnsi slots, `₹` becomes `Rs.` and anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' | '\r' | '\t' => out.push(b' '),
            ' '..='~' => out.push(c as u8),
            '\u{A0}'..='\u{FF}' => out.push(c as u32 as u8),
            '€' => out.push(0x80),
            '‘' => out.push(0x91),
            '’' => out.push(0x92),
            '“' => out.push(0x93),
            '”' => out.push(0x94),
            '•' => out.push(0x95),
            '–' => out.push(0x96),
            '—' => out.push(0x97),
            '™' => out.push(0x99),
            '₹' => out.extend_from_slice(b"Rs."),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Greedy word wrap by character count.
///
/// Explicit newlines start a new line; words longer than `max_chars` are
/// split. Always returns at least one (possibly empty) line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// =============================================================================
// Page Composer
// =============================================================================

/// Accumulates text operations page by page with a top-down cursor.
pub(crate) struct PageComposer<'a> {
    layout: &'a PageLayout,
    pages: Vec<Vec<Operation>>,
    cursor: i64,
}

impl<'a> PageComposer<'a> {
    pub(crate) fn new(layout: &'a PageLayout) -> Self {
        PageComposer {
            layout,
            pages: vec![Vec::new()],
            cursor: layout.margin_top,
        }
    }

    /// Whether a block of `height` points starting at the cursor stays above
    /// the bottom margin.
    pub(crate) fn fits(&self, height: i64) -> bool {
        let first_baseline = self.cursor;
        let last_baseline = first_baseline + (height - self.layout.line_height).max(0);
        last_baseline <= self.layout.page_height - self.layout.margin_bottom
    }

    /// Starts a new page if the block does not fit. Returns `true` on a break.
    pub(crate) fn ensure_room(&mut self, height: i64) -> bool {
        if self.fits(height) || self.cursor == self.layout.margin_top {
            return false;
        }
        self.pages.push(Vec::new());
        self.cursor = self.layout.margin_top;
        true
    }

    /// Draws one line of text at the cursor baseline.
    pub(crate) fn text(&mut self, font: Font, size: i64, x: i64, text: &str) {
        let y = self.layout.page_height - self.cursor;
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        page.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource_name().into(), size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    pub(crate) fn advance(&mut self, dy: i64) {
        self.cursor += dy;
    }

    pub(crate) fn into_pages(self) -> Vec<Vec<Operation>> {
        self.pages
    }
}

// =============================================================================
// Document Assembly
// =============================================================================

/// Builds the object graph of a PDF: page tree, catalog, info dictionary.
pub(crate) struct PdfAssembler {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl PdfAssembler {
    pub(crate) fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        PdfAssembler {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    pub(crate) fn add_object(&mut self, object: impl Into<Object>) -> ObjectId {
        self.doc.add_object(object)
    }

    /// Registers Helvetica and Helvetica-Bold; returns the `/Font` resource.
    pub(crate) fn standard_fonts(&mut self) -> Dictionary {
        let regular = self.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold = self.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        dictionary! {
            Font::Regular.resource_name() => regular,
            Font::Bold.resource_name() => bold,
        }
    }

    /// Appends a page with its own media box, resources and content stream.
    pub(crate) fn add_page(
        &mut self,
        width: i64,
        height: i64,
        resources: Dictionary,
        operations: Vec<Operation>,
    ) -> ExportResult<ObjectId> {
        let content = Content { operations };
        let encoded = content.encode().map_err(ExportError::pdf)?;
        let content_id = self.add_object(lopdf::Stream::new(dictionary! {}, encoded));
        let page_id = self.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Resources" => resources,
            "Contents" => content_id,
        });
        self.kids.push(page_id);
        Ok(page_id)
    }

    pub(crate) fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Closes the page tree and serializes the document.
    pub(crate) fn finish(mut self, title: &str, compress: bool) -> ExportResult<Vec<u8>> {
        let kids: Vec<Object> = self.kids.iter().map(|id| (*id).into()).collect();
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_id = self.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
            "Producer" => Object::string_literal(concat!("invoicer ", env!("CARGO_PKG_VERSION"))),
            "CreationDate" => Object::string_literal(created),
        });
        self.doc.trailer.set("Info", info_id);

        if compress {
            self.doc.compress();
        }

        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes).map_err(ExportError::pdf)?;
        Ok(bytes)
    }
}
