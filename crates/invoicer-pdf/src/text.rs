//! # Text Layout Exporter
//!
//! Places text primitives at computed coordinates. The result is a real text
//! PDF: selectable, searchable and small.
//!
//! ## Page Structure
//! ```text
//! ┌───────────────────────────────────────────┐
//! │                 Invoice                   │  title, 18pt bold
//! │ Client Name: Acme                         │
//! │ Address: 1 Main St                        │  client block, 12pt
//! │ Invoice Number: INV-1                     │
//! │ Date: 2024-01-01                          │
//! │                                           │
//! │ Items                                     │  heading, 14pt bold
//! │ Description        Qty   Rate   Amount    │  header row (repeated
//! │ Widget             2     100.00 200.00    │  after every page break)
//! │ ...                                       │
//! │                                           │
//! │                         Subtotal: 200.00  │
//! │                         Tax (18%): 36.00  │  totals block, kept together
//! │                         Total: 236.00     │
//! └───────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use tracing::debug;

use invoicer_core::money::{format_amount, format_quantity};
use invoicer_core::{Currency, InvoiceSnapshot, LineItem};

use crate::error::{ExportError, ExportResult};
use crate::exporter::{DocumentExporter, ExportMode, RenderedDocument};
use crate::layout::{wrap_text, Font, PageComposer, PageLayout, PdfAssembler};

/// Renders an invoice as laid-out text.
#[derive(Debug, Clone, Default)]
pub struct TextLayoutExporter {
    layout: PageLayout,
    currency: Currency,
}

impl TextLayoutExporter {
    pub fn new(currency: Currency) -> Self {
        TextLayoutExporter {
            layout: PageLayout::default(),
            currency,
        }
    }

    /// Builds the document synchronously. [`DocumentExporter::render`] wraps this.
    ///
    /// Fails with [`ExportError::NonFiniteAmount`] rather than printing a
    /// meaningless figure.
    pub fn render_blocking(&self, snapshot: &InvoiceSnapshot) -> ExportResult<RenderedDocument> {
        ensure_printable(snapshot)?;
        let pages = self.compose(snapshot);

        let mut pdf = PdfAssembler::new();
        let fonts = pdf.standard_fonts();
        let font_id = pdf.add_object(fonts);
        for operations in pages {
            let resources = lopdf::dictionary! { "Font" => font_id };
            pdf.add_page(
                self.layout.page_width,
                self.layout.page_height,
                resources,
                operations,
            )?;
        }

        let page_count = pdf.page_count();
        let bytes = pdf.finish(&document_title(snapshot), false)?;

        debug!(
            pages = page_count,
            items = snapshot.items.len(),
            bytes = bytes.len(),
            "Text layout rendered"
        );

        Ok(RenderedDocument::new(bytes, page_count, ExportMode::TextLayout))
    }

    fn compose(&self, snapshot: &InvoiceSnapshot) -> Vec<Vec<lopdf::content::Operation>> {
        let l = &self.layout;
        let mut page = PageComposer::new(l);

        // Title
        page.text(Font::Bold, l.title_size, l.title_x, "Invoice");
        page.advance(l.section_gap);

        // Client block
        let client = &snapshot.client;
        for (label, value) in [
            ("Client Name", client.name.as_str()),
            ("Address", client.address.as_str()),
            ("Invoice Number", client.invoice_number.as_str()),
            ("Date", client.date.as_str()),
        ] {
            let lines = wrap_text(&format!("{}: {}", label, value), l.line_chars);
            for line in lines {
                page.ensure_room(l.line_height);
                page.text(Font::Regular, l.body_size, l.margin_left, &line);
                page.advance(l.line_height);
            }
        }
        page.advance(l.section_gap - l.line_height);

        // Items table
        page.ensure_room(l.line_height * 3);
        page.text(Font::Bold, l.heading_size, l.margin_left, "Items");
        page.advance(l.line_height);
        self.header_row(&mut page);

        for item in &snapshot.items {
            let description = wrap_text(item.description(), l.description_chars);
            let height = l.line_height * description.len() as i64;
            if page.ensure_room(height) {
                self.header_row(&mut page);
            }
            self.item_row(&mut page, item, &description);
        }

        // Totals block
        page.advance(l.section_gap - l.line_height);
        page.ensure_room(l.line_height * 3);
        let decimals = self.currency.decimals;
        for line in [
            format!("Subtotal: {}", format_amount(snapshot.totals.subtotal, decimals)),
            format!(
                "Tax ({}): {}",
                snapshot.tax_rate.label(),
                format_amount(snapshot.totals.tax, decimals)
            ),
            format!("Total: {}", format_amount(snapshot.totals.total, decimals)),
        ] {
            page.text(Font::Bold, l.body_size, l.amount_x, &line);
            page.advance(l.line_height);
        }

        page.into_pages()
    }

    fn header_row(&self, page: &mut PageComposer<'_>) {
        let l = &self.layout;
        page.text(Font::Bold, l.body_size, l.margin_left, "Description");
        page.text(Font::Bold, l.body_size, l.qty_x, "Qty");
        page.text(Font::Bold, l.body_size, l.rate_x, "Rate");
        page.text(Font::Bold, l.body_size, l.amount_x, "Amount");
        page.advance(l.line_height);
    }

    fn item_row(&self, page: &mut PageComposer<'_>, item: &LineItem, description: &[String]) {
        let l = &self.layout;
        let decimals = self.currency.decimals;

        page.text(Font::Regular, l.body_size, l.qty_x, &format_quantity(item.quantity()));
        page.text(Font::Regular, l.body_size, l.rate_x, &format_amount(item.rate(), decimals));
        page.text(
            Font::Regular,
            l.body_size,
            l.amount_x,
            &format_amount(item.line_total(), decimals),
        );
        for line in description {
            page.text(Font::Regular, l.body_size, l.margin_left, line);
            page.advance(l.line_height);
        }
    }
}

#[async_trait]
impl DocumentExporter for TextLayoutExporter {
    fn mode(&self) -> ExportMode {
        ExportMode::TextLayout
    }

    async fn render(&self, snapshot: &InvoiceSnapshot) -> ExportResult<RenderedDocument> {
        self.render_blocking(snapshot)
    }
}

/// "Invoice INV-1", or plain "Invoice" while the number is blank.
pub(crate) fn document_title(snapshot: &InvoiceSnapshot) -> String {
    let number = snapshot.client.invoice_number.trim();
    if number.is_empty() {
        "Invoice".to_string()
    } else {
        format!("Invoice {}", number)
    }
}

fn ensure_printable(snapshot: &InvoiceSnapshot) -> ExportResult<()> {
    let totals = &snapshot.totals;
    for (name, value) in [
        ("subtotal", totals.subtotal),
        ("tax", totals.tax),
        ("total", totals.total),
    ] {
        if !value.is_finite() {
            return Err(ExportError::NonFiniteAmount(name.to_string()));
        }
    }
    for (index, item) in snapshot.items.iter().enumerate() {
        if !item.line_total().is_finite() {
            return Err(ExportError::NonFiniteAmount(format!("amount in item {}", index + 1)));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use invoicer_core::{compute_totals, ClientInfo, ItemField, LineItem, LineItemStore, TaxRate};
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    pub(crate) fn sample_snapshot(items: usize) -> InvoiceSnapshot {
        let mut store = LineItemStore::new(TaxRate::default());
        store.set_client(ClientInfo {
            name: "Acme".into(),
            address: "1 Main St".into(),
            invoice_number: "INV-1".into(),
            date: "2024-01-01".into(),
        });
        for i in 0..items {
            if i > 0 {
                store.add_item();
            }
            store.update_item(i, ItemField::Description, "Widget").unwrap();
            store.update_item(i, ItemField::Quantity, "2").unwrap();
            store.update_item(i, ItemField::Rate, "100").unwrap();
        }
        store.snapshot()
    }

    /// Every `Tj` string of every page, decoded as Latin-1.
    pub(crate) fn page_strings(bytes: &[u8]) -> Vec<Vec<String>> {
        let doc = Document::load_mem(bytes).unwrap();
        doc.get_pages()
            .values()
            .map(|page_id| {
                let content = doc.get_page_content(*page_id).unwrap();
                Content::decode(&content)
                    .unwrap()
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(bytes.iter().map(|b| *b as char).collect())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_renders_single_page_invoice() {
        let snapshot = sample_snapshot(1);
        let exporter = TextLayoutExporter::default();
        let doc = exporter.render(&snapshot).await.unwrap();

        assert_eq!(doc.file_name, "invoice.pdf");
        assert_eq!(doc.mode, ExportMode::TextLayout);
        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF-1.5"));

        let pages = page_strings(&doc.bytes);
        assert_eq!(pages.len(), 1);
        let text = &pages[0];
        for expected in [
            "Invoice",
            "Client Name: Acme",
            "Address: 1 Main St",
            "Invoice Number: INV-1",
            "Date: 2024-01-01",
            "Items",
            "Description",
            "Widget",
            "2",
            "100.00",
            "200.00",
            "Subtotal: 200.00",
            "Tax (18%): 36.00",
            "Total: 236.00",
        ] {
            assert!(text.iter().any(|s| s == expected), "missing {expected:?} in {text:?}");
        }
    }

    #[test]
    fn test_blank_invoice_still_renders() {
        let snapshot = LineItemStore::default().snapshot();
        let doc = TextLayoutExporter::default().render_blocking(&snapshot).unwrap();
        assert_eq!(doc.page_count, 1);

        let text = &page_strings(&doc.bytes)[0];
        assert!(text.iter().any(|s| s == "Client Name: "));
        assert!(text.iter().any(|s| s == "Total: 0.00"));
    }

    #[test]
    fn test_many_items_paginate_with_repeated_header() {
        let snapshot = sample_snapshot(80);
        let doc = TextLayoutExporter::default().render_blocking(&snapshot).unwrap();
        assert!(doc.page_count > 1);

        let pages = page_strings(&doc.bytes);
        assert_eq!(pages.len(), doc.page_count);
        for page in &pages {
            assert!(page.iter().any(|s| s == "Description"), "header missing on a page");
        }
        let rows: usize = pages
            .iter()
            .map(|p| p.iter().filter(|s| *s == "Widget").count())
            .sum();
        assert_eq!(rows, 80);
        assert!(pages.last().unwrap().iter().any(|s| s == "Total: 18880.00"));
    }

    #[test]
    fn test_long_description_wraps() {
        let mut store = LineItemStore::default();
        store
            .update_item(
                0,
                ItemField::Description,
                "Consulting services for the quarterly infrastructure review",
            )
            .unwrap();
        let doc = TextLayoutExporter::default()
            .render_blocking(&store.snapshot())
            .unwrap();

        let text = &page_strings(&doc.bytes)[0];
        assert!(text.iter().any(|s| s == "Consulting services for the"));
        assert!(text.iter().all(|s| s.chars().count() <= 80));
    }

    #[test]
    fn test_rupee_is_transliterated() {
        let mut snapshot = sample_snapshot(1);
        snapshot.client.name = "₹ Traders".into();
        let doc = TextLayoutExporter::default().render_blocking(&snapshot).unwrap();
        let text = &page_strings(&doc.bytes)[0];
        assert!(text.iter().any(|s| s == "Client Name: Rs. Traders"));
    }

    #[test]
    fn test_non_finite_amounts_are_refused() {
        let mut snapshot = sample_snapshot(1);
        snapshot.items.push(LineItem::new("Overflow", 1e200, 1e200));
        snapshot.totals = compute_totals(&snapshot.items, snapshot.tax_rate);

        let err = TextLayoutExporter::default().render_blocking(&snapshot).unwrap_err();
        assert!(matches!(err, ExportError::NonFiniteAmount(ref what) if what == "subtotal"));

        snapshot.items.truncate(1);
        snapshot.items.push(LineItem::new("Poison", f64::NAN, 1.0));
        snapshot.totals = sample_snapshot(1).totals;
        let err = TextLayoutExporter::default().render_blocking(&snapshot).unwrap_err();
        assert_eq!(err.to_string(), "Invoice has a non-finite amount in item 2");
    }

    #[test]
    fn test_document_title() {
        let mut snapshot = sample_snapshot(1);
        assert_eq!(document_title(&snapshot), "Invoice INV-1");
        snapshot.client.invoice_number = "  ".into();
        assert_eq!(document_title(&snapshot), "Invoice");
    }
}
