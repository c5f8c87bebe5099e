//! # Validation Module
//!
//! Input coercion and form validation for Invoicer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (host form)                                         │
//! │  ├── number inputs, date picker                                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store mutation (every keystroke)                             │
//! │  └── parse_numeric: reject non-numbers and magnitudes above 1e12       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Submit ("Validate & Preview")                                │
//! │  └── validate_invoice: required client fields, date format             │
//! │                                                                         │
//! │  Layer 2 protects the totals; layer 3 only drives the form messages.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoicer_core::types::ItemField;
//! use invoicer_core::validation::parse_numeric;
//!
//! assert_eq!(parse_numeric(ItemField::Quantity, " 3 ").unwrap(), 3.0);
//! assert_eq!(parse_numeric(ItemField::Rate, "").unwrap(), 0.0);
//! assert!(parse_numeric(ItemField::Rate, "abc").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::{FieldError, ValidationError};
use crate::types::{ClientField, ClientInfo, ItemField, LineItem};
use crate::MAX_NUMERIC_INPUT;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date format produced by HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Coerces raw numeric input for a quantity or rate field.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty input is `0` (a cleared number input)
/// - Anything else must parse as a finite `f64`; `NaN`, `inf` and garbage
///   are rejected so the caller can keep the previous value
/// - The magnitude is capped at [`MAX_NUMERIC_INPUT`]
pub fn parse_numeric(field: ItemField, raw: &str) -> ValidationResult<f64> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(value) => check_numeric(field, value, raw),
        Err(_) => Err(ValidationError::NotANumber {
            field: field.as_str().to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Checks that an already-typed number may enter the store: finite, and no
/// larger than [`MAX_NUMERIC_INPUT`] in magnitude.
pub fn ensure_finite(field: ItemField, value: f64) -> ValidationResult<f64> {
    check_numeric(field, value, &value.to_string())
}

fn check_numeric(field: ItemField, value: f64, raw: &str) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.as_str().to_string(),
            value: raw.to_string(),
        });
    }
    if value.abs() > MAX_NUMERIC_INPUT {
        return Err(ValidationError::OutOfRange {
            field: field.as_str().to_string(),
            value: raw.to_string(),
            max: MAX_NUMERIC_INPUT,
        });
    }
    Ok(value)
}

// =============================================================================
// Client Validators
// =============================================================================

/// Validates a calendar date as produced by a date input (`YYYY-MM-DD`).
///
/// ## Example
/// ```rust
/// use invoicer_core::validation::validate_date;
///
/// assert!(validate_date("2024-03-31").is_ok());
/// assert!(validate_date("2024-02-30").is_err());
/// assert!(validate_date("31/03/2024").is_err());
/// ```
pub fn validate_date(date: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidFormat {
            field: ClientField::Date.label().to_string(),
            reason: format!("expected YYYY-MM-DD ({})", e),
        }
    })
}

/// Collects every problem with the client block.
///
/// ## Rules
/// - All four fields are required (non-blank after trimming)
/// - A non-blank date must be a valid calendar date
pub fn validate_client(client: &ClientInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in ClientField::ALL {
        let value = client.get(field);
        if value.trim().is_empty() {
            errors.push(FieldError {
                field: field.as_str().to_string(),
                message: ValidationError::Required {
                    field: field.label().to_string(),
                }
                .to_string(),
            });
        } else if field == ClientField::Date {
            if let Err(e) = validate_date(value) {
                errors.push(FieldError {
                    field: field.as_str().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    errors
}

// =============================================================================
// Item Validators
// =============================================================================

/// Collects problems with the line items.
///
/// The store never admits a non-finite number, so this only fires for items
/// built outside it.
pub fn validate_items(items: &[LineItem]) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for (index, item) in items.iter().enumerate() {
        for (field, value) in [
            (ItemField::Quantity, item.quantity()),
            (ItemField::Rate, item.rate()),
        ] {
            if let Err(e) = ensure_finite(field, value) {
                errors.push(FieldError {
                    field: format!("items[{}].{}", index, field),
                    message: e.to_string(),
                });
            }
        }
    }

    errors
}

/// Validates the whole form, as the submit button does.
pub fn validate_invoice(client: &ClientInfo, items: &[LineItem]) -> ValidationResult<()> {
    let mut errors = validate_client(client);
    errors.extend(validate_items(items));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid(errors))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_client() -> ClientInfo {
        ClientInfo {
            name: "Acme".to_string(),
            address: "1 Road".to_string(),
            invoice_number: "INV-1".to_string(),
            date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_parse_numeric_accepts_numbers() {
        assert_eq!(parse_numeric(ItemField::Quantity, "3").unwrap(), 3.0);
        assert_eq!(parse_numeric(ItemField::Rate, "99.5").unwrap(), 99.5);
        assert_eq!(parse_numeric(ItemField::Rate, "  12 ").unwrap(), 12.0);
        assert_eq!(parse_numeric(ItemField::Rate, "1e3").unwrap(), 1000.0);
        assert_eq!(parse_numeric(ItemField::Rate, "-4").unwrap(), -4.0);
    }

    #[test]
    fn test_parse_numeric_empty_is_zero() {
        assert_eq!(parse_numeric(ItemField::Quantity, "").unwrap(), 0.0);
        assert_eq!(parse_numeric(ItemField::Quantity, "   ").unwrap(), 0.0);
    }

    #[test]
    fn test_parse_numeric_rejects_non_numbers() {
        for raw in ["abc", "1,5", "NaN", "inf", "-infinity", "12abc"] {
            let err = parse_numeric(ItemField::Rate, raw).unwrap_err();
            assert!(
                matches!(err, ValidationError::NotANumber { ref field, .. } if field == "rate"),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_numeric_caps_magnitude() {
        assert_eq!(parse_numeric(ItemField::Rate, "1e12").unwrap(), 1e12);
        assert_eq!(parse_numeric(ItemField::Quantity, "-1e12").unwrap(), -1e12);
        for raw in ["1e200", "-1e200", "1.0000001e12"] {
            let err = parse_numeric(ItemField::Rate, raw).unwrap_err();
            assert!(
                matches!(err, ValidationError::OutOfRange { ref value, .. } if value == raw),
                "{raw} should be out of range"
            );
        }
        assert!(matches!(
            ensure_finite(ItemField::Quantity, 5e15),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            ensure_finite(ItemField::Quantity, f64::NAN),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-31").is_ok());
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("yesterday").is_err());
    }

    #[test]
    fn test_validate_client_complete() {
        assert!(validate_client(&complete_client()).is_empty());
    }

    #[test]
    fn test_validate_client_reports_each_missing_field() {
        let errors = validate_client(&ClientInfo::default());
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Client Name is required",
                "Address is required",
                "Invoice Number is required",
                "Date is required",
            ]
        );
        assert_eq!(errors[2].field, "invoiceNumber");
    }

    #[test]
    fn test_validate_client_bad_date() {
        let mut client = complete_client();
        client.date = "01-05-2024".to_string();
        let errors = validate_client(&client);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "date");
        assert!(errors[0].message.starts_with("Date has invalid format"));
    }

    #[test]
    fn test_validate_invoice() {
        let items = vec![LineItem::new("Widget", 2.0, 50.0)];
        assert!(validate_invoice(&complete_client(), &items).is_ok());

        let bad_items = vec![LineItem::new("Broken", f64::NAN, 1.0)];
        let err = validate_invoice(&complete_client(), &bad_items).unwrap_err();
        let fields = err.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "items[0].quantity");
    }
}
