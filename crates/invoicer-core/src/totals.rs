//! # Totals
//!
//! Derives subtotal, tax and total from the current line items.
//!
//! ```text
//! items ──► Σ quantity × rate ──► subtotal
//!                                    │
//!                                    ├──► × tax_rate ──► tax
//!                                    │
//!                                    └──► + tax ───────► total
//! ```
//!
//! The line product is recomputed for every item on every call. A cached
//! [`LineItem::amount`] is never read here, so totals cannot drift from the
//! quantities and rates actually stored.

use crate::types::{LineItem, TaxRate, Totals};

/// Computes the totals for a list of items.
///
/// Pure and order-independent. An empty list yields all zeros.
///
/// ## Example
/// ```rust
/// use invoicer_core::totals::compute_totals;
/// use invoicer_core::types::{LineItem, TaxRate};
///
/// let items = vec![LineItem::new("Widget", 3.0, 100.0)];
/// let totals = compute_totals(&items, TaxRate::default());
/// assert_eq!(totals.subtotal, 300.0);
/// assert!((totals.tax - 54.0).abs() < 1e-9);
/// ```
pub fn compute_totals(items: &[LineItem], tax_rate: TaxRate) -> Totals {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    Totals::from_subtotal(subtotal, tax_rate)
}

impl Totals {
    /// Builds totals from an already-summed subtotal.
    pub fn from_subtotal(subtotal: f64, tax_rate: TaxRate) -> Self {
        let tax = subtotal * tax_rate.multiplier();
        Totals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// All-zero totals of an empty invoice.
    pub const fn zero() -> Self {
        Totals {
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_empty_list_is_zero() {
        let totals = compute_totals(&[], TaxRate::default());
        assert_eq!(totals, Totals::zero());
    }

    #[test]
    fn test_single_item() {
        let items = vec![LineItem::new("Widget", 2.0, 50.0)];
        let totals = compute_totals(&items, TaxRate::default());
        assert_eq!(totals.subtotal, 100.0);
        assert!((totals.tax - 18.0).abs() < EPSILON);
        assert!((totals.total - 118.0).abs() < EPSILON);
    }

    #[test]
    fn test_custom_rate() {
        let items = vec![
            LineItem::new("A", 1.0, 10.0),
            LineItem::new("B", 4.0, 2.5),
        ];
        let totals = compute_totals(&items, TaxRate::new(0.05).unwrap());
        assert_eq!(totals.subtotal, 20.0);
        assert!((totals.tax - 1.0).abs() < EPSILON);
        assert!((totals.total - 21.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_rate() {
        let items = vec![LineItem::new("A", 3.0, 7.0)];
        let totals = compute_totals(&items, TaxRate::zero());
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 21.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: tax is subtotal × rate and total is subtotal + tax.
        #[test]
        fn totals_are_consistent(
            lines in prop::collection::vec((0.0f64..1_000.0, 0.0f64..10_000.0), 0..20),
            rate in 0.0f64..1.0,
        ) {
            let items: Vec<LineItem> = lines
                .iter()
                .map(|(qty, rate)| LineItem::new("x", *qty, *rate))
                .collect();
            let tax_rate = TaxRate::new(rate).unwrap();
            let totals = compute_totals(&items, tax_rate);

            let expected: f64 = lines.iter().map(|(q, r)| q * r).sum();
            prop_assert!((totals.subtotal - expected).abs() <= EPSILON * expected.max(1.0));
            prop_assert!((totals.tax - totals.subtotal * rate).abs() <= EPSILON * totals.subtotal.max(1.0));
            prop_assert_eq!(totals.total, totals.subtotal + totals.tax);
        }
    }
}
