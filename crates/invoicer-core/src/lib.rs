//! # invoicer-core: Pure Business Logic for Invoicer
//!
//! This crate is the **heart** of Invoicer. It owns the invoice being edited
//! (client details + line items) and everything derived from it, as plain
//! data and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoicer Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Form Frontend (host)                         │   │
//! │  │    Client fields ──► Item rows ──► Totals panel ──► Export      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    invoicer-app                                 │   │
//! │  │    add_item, update_item, validate_form, export_pdf, etc.      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ invoicer-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │  totals   │  │ validation│  │   │
//! │  │   │ LineItem  │  │ LineItem  │  │ compute_  │  │  rules    │  │   │
//! │  │   │ Client    │  │  Store    │  │  totals   │  │  coercion │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    invoicer-pdf (Export Layer)                  │   │
//! │  │          Text layout and rasterized snapshot strategies         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ClientInfo, LineItem, TaxRate, Totals)
//! - [`store`] - The line item store, the only place the invoice is mutated
//! - [`totals`] - Subtotal / tax / total derivation
//! - [`money`] - Currency formatting for display (rounding happens here only)
//! - [`error`] - Domain error types
//! - [`validation`] - Numeric coercion and required-field rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: totals are a function of the items, never stored state
//! 2. **No I/O**: file system and rendering live in `invoicer-pdf`
//! 3. **Float Money, Rounded Late**: amounts are `f64`; two-decimal rounding is
//!    a presentation concern handled by [`money`]
//! 4. **No NaN**: non-numeric input is rejected before it reaches the store
//!
//! ## Example Usage
//!
//! ```rust
//! use invoicer_core::store::LineItemStore;
//! use invoicer_core::types::{ItemField, TaxRate};
//!
//! let mut store = LineItemStore::new(TaxRate::default());
//! store.update_item(0, ItemField::Quantity, "3").unwrap();
//! let totals = store.update_item(0, ItemField::Rate, "100").unwrap();
//!
//! assert_eq!(totals.subtotal, 300.0);
//! assert!((totals.tax - 54.0).abs() < 1e-9);
//! assert!((totals.total - 354.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod store;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoicer_core::LineItemStore` instead of
// `use invoicer_core::store::LineItemStore`

pub use error::{CoreError, CoreResult, FieldError, ValidationError};
pub use money::Currency;
pub use store::LineItemStore;
pub use totals::compute_totals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax multiplier applied to the subtotal when nothing else is configured.
///
/// 0.18 = 18%, the flat rate the invoice form was built around.
pub const DEFAULT_TAX_RATE: f64 = 0.18;

/// Currency symbol printed in front of every amount by default.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Number of decimals shown for monetary values.
pub const DEFAULT_CURRENCY_DECIMALS: u8 = 2;

/// Largest magnitude a quantity or rate may hold.
///
/// A line total is at most 1e24, so subtotal, tax and total stay finite for
/// any number of items.
pub const MAX_NUMERIC_INPUT: f64 = 1e12;

/// Largest accepted tax multiplier (1000%).
pub const MAX_TAX_RATE: f64 = 10.0;
