//! # Line Item Store
//!
//! Owns the invoice being edited: the client block, the ordered line items
//! and the totals derived from them.
//!
//! ## Store Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operations                                     │
//! │                                                                         │
//! │  Form Action              Store Method            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  Click "Add Item" ───────► add_item() ──────────► items.push(blank)    │
//! │                                                                         │
//! │  Type in a cell ─────────► update_item() ───────► items[i].field = v   │
//! │                                                   items[i].amount = q×r│
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Type client field ──────► set_client_field() ──► client.field = v     │
//! │                                                                         │
//! │  Every item mutation recomputes totals before returning them.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `totals() == compute_totals(items(), tax_rate())` after every call
//! - every stored quantity and rate is finite and at most `MAX_NUMERIC_INPUT`
//!   in magnitude, so totals are always finite
//! - an out-of-range index never panics; the call does nothing

use tracing::{debug, warn};

use crate::error::CoreResult;
use crate::totals::compute_totals;
use crate::types::{ClientField, ClientInfo, InvoiceSnapshot, ItemField, LineItem, TaxRate, Totals};
use crate::validation::{ensure_finite, parse_numeric};

/// The invoice under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemStore {
    client: ClientInfo,
    items: Vec<LineItem>,
    tax_rate: TaxRate,
    totals: Totals,
}

impl LineItemStore {
    /// Creates a store holding exactly one blank item.
    pub fn new(tax_rate: TaxRate) -> Self {
        let items = vec![LineItem::blank()];
        let totals = compute_totals(&items, tax_rate);
        LineItemStore {
            client: ClientInfo::default(),
            items,
            tax_rate,
            totals,
        }
    }

    // =========================================================================
    // Line Items
    // =========================================================================

    /// Appends a blank item `{"", 1, 0, 0}`. Always succeeds.
    pub fn add_item(&mut self) -> Totals {
        self.items.push(LineItem::blank());
        debug!(count = self.items.len(), "line item added");
        self.recompute()
    }

    /// Applies raw form input to one field of one item.
    ///
    /// ## Behavior
    /// - `Description`: stored verbatim
    /// - `Quantity` / `Rate`: coerced with [`parse_numeric`], then `amount`
    ///   is recomputed for that item
    /// - out-of-range `index`: nothing changes, current totals are returned
    ///
    /// ## Errors
    /// Non-numeric input for a numeric field returns
    /// [`crate::ValidationError::NotANumber`], and a magnitude above
    /// [`crate::MAX_NUMERIC_INPUT`] returns [`crate::ValidationError::OutOfRange`].
    /// Either way the item is untouched and the previous valid value stays.
    pub fn update_item(&mut self, index: usize, field: ItemField, raw: &str) -> CoreResult<Totals> {
        if index >= self.items.len() {
            warn!(index, len = self.items.len(), %field, "update_item: index out of range, ignored");
            return Ok(self.totals);
        }

        match field {
            ItemField::Description => {
                self.items[index].set_description(raw);
            }
            ItemField::Quantity | ItemField::Rate => {
                let value = parse_numeric(field, raw).map_err(|e| {
                    warn!(index, %field, raw, error = %e, "rejected numeric input");
                    e
                })?;
                self.apply_number(index, field, value);
            }
        }

        Ok(self.recompute())
    }

    /// Sets a quantity from an already-typed number.
    pub fn set_quantity(&mut self, index: usize, quantity: f64) -> CoreResult<Totals> {
        self.set_number(index, ItemField::Quantity, quantity)
    }

    /// Sets a unit rate from an already-typed number.
    pub fn set_rate(&mut self, index: usize, rate: f64) -> CoreResult<Totals> {
        self.set_number(index, ItemField::Rate, rate)
    }

    /// Removes the item at `index`, shifting later items left.
    ///
    /// Removing the last remaining item is allowed and leaves an empty list.
    pub fn remove_item(&mut self, index: usize) -> Totals {
        if index >= self.items.len() {
            warn!(index, len = self.items.len(), "remove_item: index out of range, ignored");
            return self.totals;
        }

        self.items.remove(index);
        debug!(index, count = self.items.len(), "line item removed");
        self.recompute()
    }

    // =========================================================================
    // Client
    // =========================================================================

    /// Overwrites one client field.
    pub fn set_client_field(&mut self, field: ClientField, value: impl Into<String>) {
        self.client.set(field, value);
    }

    /// Replaces the whole client block.
    pub fn set_client(&mut self, client: ClientInfo) {
        self.client = client;
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts a fresh invoice: empty client, one blank item.
    pub fn clear(&mut self) {
        *self = LineItemStore::new(self.tax_rate);
    }

    /// Changes the tax rate and recomputes totals.
    pub fn set_tax_rate(&mut self, tax_rate: TaxRate) -> Totals {
        self.tax_rate = tax_rate;
        self.recompute()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn client(&self) -> &ClientInfo {
        &self.client
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copies the current state for an exporter.
    pub fn snapshot(&self) -> InvoiceSnapshot {
        InvoiceSnapshot {
            client: self.client.clone(),
            items: self.items.clone(),
            totals: self.totals,
            tax_rate: self.tax_rate,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_number(&mut self, index: usize, field: ItemField, value: f64) -> CoreResult<Totals> {
        if index >= self.items.len() {
            warn!(index, len = self.items.len(), %field, "set_number: index out of range, ignored");
            return Ok(self.totals);
        }

        let value = ensure_finite(field, value)?;
        self.apply_number(index, field, value);
        Ok(self.recompute())
    }

    fn apply_number(&mut self, index: usize, field: ItemField, value: f64) {
        let item = &mut self.items[index];
        match field {
            ItemField::Quantity => item.set_quantity(value),
            ItemField::Rate => item.set_rate(value),
            ItemField::Description => {}
        }
    }

    fn recompute(&mut self) -> Totals {
        self.totals = compute_totals(&self.items, self.tax_rate);
        self.totals
    }
}

impl Default for LineItemStore {
    fn default() -> Self {
        LineItemStore::new(TaxRate::default())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
