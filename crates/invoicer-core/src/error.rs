//! # Error Types
//!
//! Domain-specific error types for invoicer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoicer-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  invoicer-pdf errors (separate crate)                                  │
//! │  └── ExportError      - Rendering / capture / file failures            │
//! │                                                                         │
//! │  App errors (in invoicer-app)                                          │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, rejected value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tax rate is negative, above `MAX_TAX_RATE`, NaN or infinite.
    ///
    /// ## When This Occurs
    /// - A config file sets `tax_rate = -0.1`
    /// - A host passes a rate computed from bad input
    #[error("Invalid tax rate: {value} (must be a finite multiplier between 0 and {max})", max = crate::MAX_TAX_RATE)]
    InvalidTaxRate { value: f64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the store is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field received something that is not a finite number.
    ///
    /// ## User Workflow
    /// ```text
    /// Quantity input: "abc"
    ///      │
    ///      ▼
    /// parse_numeric("quantity", "abc")
    ///      │
    ///      ▼
    /// NotANumber { field: "quantity", value: "abc" }
    ///      │
    ///      ▼
    /// Store keeps the previous quantity, totals stay finite
    /// ```
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// A numeric field received a finite number too large to total safely.
    #[error("{field} must be between -{max} and {max}, got '{value}'")]
    OutOfRange { field: String, value: String, max: f64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Whole-form validation failed; one entry per offending field.
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
}

impl ValidationError {
    /// Flattens the error into per-field messages for the form.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ValidationError::Invalid(errors) => errors.clone(),
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => vec![FieldError {
                field: field.clone(),
                message: self.to_string(),
            }],
        }
    }
}

/// A single field-level problem, shown next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Wire name of the field (`name`, `invoiceNumber`, `items[2].rate`, ...)
    pub field: String,

    /// Human-readable message (`Client Name is required`)
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
