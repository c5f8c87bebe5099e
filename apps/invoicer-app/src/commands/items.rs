//! # Item Commands
//!
//! Commands for the line item table and the totals panel.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Blank   │────►│ Editing  │────►│ Validated│────►│ Exported │       │
//! │  │  Form    │     │          │     │          │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │  ▲              │                              │
//! │                   add_item│        any edit                             │
//! │                   update_item ◄──────────┘                              │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   reset_invoice ─────────────────►                     │
//! │                                                   (back to blank)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use invoicer_core::{ItemField, LineItem, Totals};

use crate::error::AppResult;
use crate::state::{ConfigState, InvoiceSession, SessionState};

/// Totals formatted for the totals panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDisplay {
    /// `"₹200.00"`
    pub subtotal: String,
    /// `"₹36.00"`
    pub tax: String,
    /// `"₹236.00"`
    pub total: String,
    /// `"Tax (18%)"`
    pub tax_label: String,
}

/// Item table response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub display: TotalsDisplay,
    pub validated: bool,
}

impl InvoiceResponse {
    pub fn build(session: &InvoiceSession, config: &ConfigState) -> Self {
        let store = session.store();
        let totals = store.totals();
        InvoiceResponse {
            items: store.items().to_vec(),
            totals,
            display: TotalsDisplay {
                subtotal: config.format_currency(totals.subtotal),
                tax: config.format_currency(totals.tax),
                total: config.format_currency(totals.total),
                tax_label: format!("Tax ({})", store.tax_rate().label()),
            },
            validated: session.is_validated(),
        }
    }
}

/// Gets the current items and totals.
pub fn get_invoice(session: &SessionState, config: &ConfigState) -> InvoiceResponse {
    debug!("get_invoice command");
    session.with_session(|s| InvoiceResponse::build(s, config))
}

/// Appends a blank row `{description: "", quantity: 1, rate: 0}`.
pub fn add_item(session: &SessionState, config: &ConfigState) -> AppResult<InvoiceResponse> {
    debug!("add_item command");
    session.with_session_mut(|s| -> AppResult<InvoiceResponse> {
        s.mutate(|store| Ok(store.add_item()))?;
        Ok(InvoiceResponse::build(s, config))
    })
}

/// Applies one cell edit.
///
/// ## Arguments
/// * `index` - Row index; out of range is ignored
/// * `field` - `description`, `quantity` or `rate` (`qty` / `price` accepted)
/// * `value` - Raw input text; numeric fields must parse as a number
///
/// ## Errors
/// `INVALID_INPUT` for an unknown field, a non-numeric value or a magnitude
/// above 1e12. The row keeps
/// its previous value.
pub fn update_item(
    session: &SessionState,
    config: &ConfigState,
    index: usize,
    field: &str,
    value: &str,
) -> AppResult<InvoiceResponse> {
    debug!(index, field, value, "update_item command");
    let field: ItemField = field.parse()?;

    session.with_session_mut(|s| -> AppResult<InvoiceResponse> {
        s.mutate(|store| store.update_item(index, field, value))?;
        Ok(InvoiceResponse::build(s, config))
    })
}

/// Removes one row. Removing the last row leaves an empty table.
pub fn remove_item(
    session: &SessionState,
    config: &ConfigState,
    index: usize,
) -> AppResult<InvoiceResponse> {
    debug!(index, "remove_item command");
    session.with_session_mut(|s| -> AppResult<InvoiceResponse> {
        s.mutate(|store| Ok(store.remove_item(index)))?;
        Ok(InvoiceResponse::build(s, config))
    })
}

/// Starts over with an empty client block and one blank row.
pub fn reset_invoice(session: &SessionState, config: &ConfigState) -> InvoiceResponse {
    debug!("reset_invoice command");
    session.with_session_mut(|s| {
        s.reset();
        InvoiceResponse::build(s, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (SessionState, ConfigState) {
        let config = ConfigState::default();
        (SessionState::new(config.tax_rate()), config)
    }

    #[test]
    fn test_initial_invoice() {
        let (session, config) = setup();
        let invoice = get_invoice(&session, &config);

        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].quantity(), 1.0);
        assert_eq!(invoice.display.total, "₹0.00");
        assert_eq!(invoice.display.tax_label, "Tax (18%)");
    }

    #[test]
    fn test_edit_flow_updates_totals() {
        let (session, config) = setup();
        update_item(&session, &config, 0, "description", "Widget").unwrap();
        update_item(&session, &config, 0, "quantity", "2").unwrap();
        let invoice = update_item(&session, &config, 0, "rate", "100").unwrap();

        assert_eq!(invoice.items[0].amount(), 200.0);
        assert_eq!(invoice.display.subtotal, "₹200.00");
        assert_eq!(invoice.display.tax, "₹36.00");
        assert_eq!(invoice.display.total, "₹236.00");
    }

    #[test]
    fn test_non_numeric_input_is_rejected() {
        let (session, config) = setup();
        update_item(&session, &config, 0, "rate", "50").unwrap();

        let err = update_item(&session, &config, 0, "rate", "fifty").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let invoice = get_invoice(&session, &config);
        assert_eq!(invoice.items[0].rate(), 50.0);
        assert_eq!(invoice.totals.subtotal, 50.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let (session, config) = setup();
        let err = update_item(&session, &config, 0, "colour", "red").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_price_alias() {
        let (session, config) = setup();
        let invoice = update_item(&session, &config, 0, "price", "7").unwrap();
        assert_eq!(invoice.items[0].rate(), 7.0);
    }

    #[test]
    fn test_add_and_remove() {
        let (session, config) = setup();
        add_item(&session, &config).unwrap();
        update_item(&session, &config, 1, "rate", "10").unwrap();

        let invoice = remove_item(&session, &config, 0).unwrap();
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.items[0].rate(), 10.0);

        let invoice = remove_item(&session, &config, 0).unwrap();
        assert!(invoice.items.is_empty());
        assert_eq!(invoice.totals, Totals::zero());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let (session, config) = setup();
        let before = get_invoice(&session, &config);
        let after = update_item(&session, &config, 9, "quantity", "3").unwrap();
        assert_eq!(before.items, after.items);
        let after = remove_item(&session, &config, 9).unwrap();
        assert_eq!(before.items, after.items);
    }

    #[test]
    fn test_out_of_range_edit_keeps_validated_flag() {
        let (session, config) = setup();
        session.with_session_mut(|s| s.set_validated(true));

        let invoice = update_item(&session, &config, 9, "rate", "3").unwrap();
        assert!(invoice.validated);
        let invoice = remove_item(&session, &config, 9).unwrap();
        assert!(invoice.validated);

        let invoice = update_item(&session, &config, 0, "rate", "3").unwrap();
        assert!(!invoice.validated);
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let (session, config) = setup();
        update_item(&session, &config, 0, "quantity", "1e12").unwrap();

        let err = update_item(&session, &config, 0, "rate", "1e200").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.fields[0].field, "rate");

        let invoice = get_invoice(&session, &config);
        assert_eq!(invoice.items[0].rate(), 0.0);
        assert_eq!(invoice.display.total, "₹0.00");
    }

    #[test]
    fn test_reset_invoice() {
        let (session, config) = setup();
        add_item(&session, &config).unwrap();
        update_item(&session, &config, 0, "rate", "10").unwrap();

        let invoice = reset_invoice(&session, &config);
        assert_eq!(invoice.items.len(), 1);
        assert_eq!(invoice.totals, Totals::zero());
    }

    #[test]
    fn test_response_wire_format() {
        let (session, config) = setup();
        let json = serde_json::to_value(get_invoice(&session, &config)).unwrap();
        assert!(json["items"].is_array());
        assert!(json["display"]["taxLabel"].is_string());
        assert_eq!(json["validated"], false);
    }
}
