//! # Domain Types
//!
//! Core domain types used throughout Invoicer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ClientInfo    │   │    LineItem     │   │     Totals      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  description    │   │  subtotal       │       │
//! │  │  address        │   │  quantity       │   │  tax            │       │
//! │  │  invoice_number │   │  rate           │   │  total          │       │
//! │  │  date           │   │  amount (deriv) │   │  (all derived)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  ClientField    │   │   ItemField     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  multiplier f64 │   │  Name, Address  │   │  Description    │       │
//! │  │  0.18 = 18%     │   │  InvoiceNumber  │   │  Quantity       │       │
//! │  └─────────────────┘   │  Date           │   │  Rate           │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Line items have no id: a row is identified by its position in the list,
//! which is also its display order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::{DEFAULT_TAX_RATE, MAX_TAX_RATE};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a multiplier applied to the subtotal.
///
/// `0.18` means 18%. Always finite and non-negative; construct through
/// [`TaxRate::new`] (or deserialize, which goes through the same check).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a multiplier (`0.18` for 18%).
    pub fn new(multiplier: f64) -> Result<Self, CoreError> {
        if !multiplier.is_finite() || !(0.0..=MAX_TAX_RATE).contains(&multiplier) {
            return Err(CoreError::InvalidTaxRate { value: multiplier });
        }
        Ok(TaxRate(multiplier))
    }

    /// Returns the multiplier.
    #[inline]
    pub const fn multiplier(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Percentage label used in totals captions, e.g. `"18%"` or `"7.5%"`.
    pub fn label(&self) -> String {
        let pct = format!("{:.2}", self.percentage());
        let pct = pct.trim_end_matches('0').trim_end_matches('.');
        format!("{}%", pct)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE)
    }
}

impl TryFrom<f64> for TaxRate {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        TaxRate::new(value)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

// =============================================================================
// Client
// =============================================================================

/// Who the invoice is addressed to.
///
/// Every field is free text, overwritten as the user types. Emptiness is
/// checked by [`crate::validation::validate_client`], not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    /// Client (company or person) name.
    pub name: String,

    /// Postal address, possibly multi-line.
    pub address: String,

    /// Business identifier printed on the invoice (e.g. `INV-1`).
    pub invoice_number: String,

    /// Invoice date as entered by the date picker (`YYYY-MM-DD`).
    pub date: String,
}

impl ClientInfo {
    /// Returns the current value of a field.
    pub fn get(&self, field: ClientField) -> &str {
        match field {
            ClientField::Name => &self.name,
            ClientField::Address => &self.address,
            ClientField::InvoiceNumber => &self.invoice_number,
            ClientField::Date => &self.date,
        }
    }

    /// Overwrites a single field.
    pub fn set(&mut self, field: ClientField, value: impl Into<String>) {
        let slot = match field {
            ClientField::Name => &mut self.name,
            ClientField::Address => &mut self.address,
            ClientField::InvoiceNumber => &mut self.invoice_number,
            ClientField::Date => &mut self.date,
        };
        *slot = value.into();
    }
}

/// Selector for one [`ClientInfo`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ClientField {
    Name,
    Address,
    InvoiceNumber,
    Date,
}

impl ClientField {
    /// All fields in form order.
    pub const ALL: [ClientField; 4] = [
        ClientField::Name,
        ClientField::Address,
        ClientField::InvoiceNumber,
        ClientField::Date,
    ];

    /// Wire name, matching the serialized [`ClientInfo`] keys.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClientField::Name => "name",
            ClientField::Address => "address",
            ClientField::InvoiceNumber => "invoiceNumber",
            ClientField::Date => "date",
        }
    }

    /// Label shown next to the input and in validation messages.
    pub const fn label(&self) -> &'static str {
        match self {
            ClientField::Name => "Client Name",
            ClientField::Address => "Address",
            ClientField::InvoiceNumber => "Invoice Number",
            ClientField::Date => "Date",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(ClientField::Name),
            "address" => Ok(ClientField::Address),
            "invoiceNumber" | "invoice_number" => Ok(ClientField::InvoiceNumber),
            "date" => Ok(ClientField::Date),
            other => Err(ValidationError::NotAllowed {
                field: format!("client field '{}'", other),
                allowed: ClientField::ALL
                    .iter()
                    .map(|f| f.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One billable row.
///
/// ## Invariant
/// `amount == quantity * rate` after every mutation. There is no way to set
/// `amount` directly: the quantity/rate setters recompute it, and the fields
/// are private so nothing outside this crate can break the pairing.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    description: String,
    quantity: f64,
    rate: f64,
    amount: f64,
}

impl LineItem {
    /// Creates an item; `amount` is derived.
    pub fn new(description: impl Into<String>, quantity: f64, rate: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            rate,
            amount: quantity * rate,
        }
    }

    /// The row added by "Add Item": `{"", 1, 0, 0}`.
    pub fn blank() -> Self {
        LineItem::new("", 1.0, 0.0)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Unit price.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Cached `quantity * rate`, kept for display.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Freshly recomputed `quantity * rate`. Totals always use this.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.rate
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_quantity(&mut self, quantity: f64) {
        self.quantity = quantity;
        self.amount = self.line_total();
    }

    pub(crate) fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.amount = self.line_total();
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::blank()
    }
}

/// Selector for one editable [`LineItem`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ItemField {
    Description,
    Quantity,
    /// Unit price. Accepts `"price"` as an alias when parsed from a string.
    #[serde(alias = "price")]
    Rate,
}

impl ItemField {
    pub const ALL: [ItemField; 3] = [ItemField::Description, ItemField::Quantity, ItemField::Rate];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::Quantity => "quantity",
            ItemField::Rate => "rate",
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "description" => Ok(ItemField::Description),
            "quantity" | "qty" => Ok(ItemField::Quantity),
            "rate" | "price" => Ok(ItemField::Rate),
            other => Err(ValidationError::NotAllowed {
                field: format!("item field '{}'", other),
                allowed: ItemField::ALL.iter().map(|f| f.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived invoice totals. Never mutated independently of the items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Σ quantity × rate
    pub subtotal: f64,

    /// subtotal × tax rate
    pub tax: f64,

    /// subtotal + tax
    pub total: f64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable copy of everything an exporter needs.
///
/// Taken under the session lock and then handed off, so rendering never
/// observes a half-applied edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSnapshot {
    pub client: ClientInfo,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub tax_rate: TaxRate,
}
