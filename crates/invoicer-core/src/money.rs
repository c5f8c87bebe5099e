//! # Money Module
//!
//! Display formatting for monetary values.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  STORED MODEL (f64, unrounded)        PRESENTATION (this module)        │
//! │                                                                         │
//! │  quantity × rate = 33.3333...   ───►  "₹33.33"                          │
//! │  subtotal        = 99.9999...   ───►  "₹100.00"                         │
//! │  tax             = 17.9999...   ───►  "₹18.00"                          │
//! │                                                                         │
//! │  Rounding is applied ONLY when a value is turned into text.            │
//! │  Totals are always summed from the unrounded line values.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoicer_core::money::{format_amount, Currency};
//!
//! let inr = Currency::default();
//! assert_eq!(inr.format(100.0), "₹100.00");
//! assert_eq!(format_amount(54.0, 2), "54.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CURRENCY_DECIMALS, DEFAULT_CURRENCY_SYMBOL};

// =============================================================================
// Currency
// =============================================================================

/// A fixed currency symbol plus the number of decimals to show.
///
/// No locale logic: no digit grouping, and the symbol always prefixes
/// the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// Symbol printed before the amount (`₹`, `$`, `€`)
    pub symbol: String,

    /// Digits after the decimal point
    pub decimals: u8,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        Currency {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Formats an amount with the symbol, e.g. `₹1234.50` or `-₹5.50`.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Currency;
    ///
    /// let usd = Currency::new("$", 2);
    /// assert_eq!(usd.format(12.5), "$12.50");
    /// assert_eq!(usd.format(-5.5), "-$5.50");
    /// ```
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return format!("{}{}", self.symbol, value);
        }
        let digits = format_amount(value.abs(), self.decimals);
        if is_negative_after_rounding(value, self.decimals) {
            format!("-{}{}", self.symbol, digits)
        } else {
            format!("{}{}", self.symbol, digits)
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::new(DEFAULT_CURRENCY_SYMBOL, DEFAULT_CURRENCY_DECIMALS)
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Formats a number with a fixed number of decimals and no symbol.
///
/// Never produces `-0.00`: values that round to zero are printed unsigned.
/// Non-finite values print as `inf`, `-inf` or `NaN`, never as a number.
pub fn format_amount(value: f64, decimals: u8) -> String {
    let decimals = decimals as usize;
    if !value.is_finite() {
        return value.to_string();
    }
    let text = format!("{:.*}", decimals, value.abs());
    if is_negative_after_rounding(value, decimals as u8) {
        format!("-{}", text)
    } else {
        text
    }
}

/// Formats a quantity the way a number input shows it: `2`, `2.5`, `0.125`.
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // f64's Display is already the shortest round-trip form without exponent
    // for the magnitudes a quantity field can hold.
    let text = value.to_string();
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

fn is_negative_after_rounding(value: f64, decimals: u8) -> bool {
    if value >= 0.0 || !value.is_finite() {
        return false;
    }
    let text = format!("{:.*}", decimals as usize, value.abs());
    text.chars().any(|c| c.is_ascii_digit() && c != '0')
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_currency_is_rupee() {
        let currency = Currency::default();
        assert_eq!(currency.symbol, "₹");
        assert_eq!(currency.decimals, 2);
        assert_eq!(currency.format(100.0), "₹100.00");
        assert_eq!(currency.format(0.0), "₹0.00");
    }

    #[test]
    fn test_format_amount_rounds_at_presentation() {
        assert_eq!(format_amount(100.0, 2), "100.00");
        assert_eq!(format_amount(54.0, 2), "54.00");
        assert_eq!(format_amount(33.333333, 2), "33.33");
        assert_eq!(format_amount(1.0 / 3.0 * 3.0, 2), "1.00");
        assert_eq!(format_amount(7.0, 0), "7");
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(format_amount(-0.0, 2), "0.00");
        assert_eq!(format_amount(-0.001, 2), "0.00");
        assert_eq!(Currency::default().format(-0.001), "₹0.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(-5.5, 2), "-5.50");
        assert_eq!(Currency::new("$", 2).format(-1234.0), "-$1234.00");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(0.125), "0.125");
    }

    #[test]
    fn test_non_finite_is_never_shown_as_zero() {
        assert_eq!(format_amount(f64::INFINITY, 2), "inf");
        assert_eq!(format_amount(f64::NEG_INFINITY, 2), "-inf");
        assert_eq!(format_amount(f64::NAN, 2), "NaN");
        assert_eq!(format_quantity(f64::NAN), "NaN");
        assert_eq!(Currency::default().format(f64::INFINITY), "₹inf");
        assert_eq!(Currency::new("$", 2).format(f64::NAN), "$NaN");
    }
}
