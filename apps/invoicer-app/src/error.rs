//! # API Error Type
//!
//! Unified error type for host commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Invoicer                               │
//! │                                                                         │
//! │  Form                        Rust Backend                               │
//! │  ────                        ────────────                               │
//! │                                                                         │
//! │  invoke('update_item', { index: 0, field: 'quantity', value: 'abc' })  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ─── ValidationError::NotANumber ──┐                  │  │
//! │  │         │                                      │                 │  │
//! │  │         ▼                                      ▼                 │  │
//! │  │  Export failed? ─── ExportError::Capture ──── ApiError ─────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INVALID_INPUT"                                          │
//! │    // e.message = "quantity must be a number, got 'abc'"                │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use invoicer_core::{CoreError, FieldError, ValidationError};
use invoicer_pdf::ExportError;

/// Result type for commands.
pub type AppResult<T> = Result<T, ApiError>;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "2 field(s) failed validation",
///   "fields": [{ "field": "name", "message": "Client Name is required" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field details, empty unless the error came from form validation
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Required form fields are missing or malformed
    ValidationError,

    /// A single input could not be applied (non-numeric, unknown field)
    InvalidInput,

    /// The PDF could not be produced or written
    ExportError,

    /// An export is already running
    ExportInProgress,

    /// The configuration file is unreadable or invalid
    ConfigError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }

    /// Creates an export error.
    pub fn export(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportError, message)
    }

    pub fn export_in_progress() -> Self {
        ApiError::new(ErrorCode::ExportInProgress, "An export is already in progress")
    }
}

/// Converts validation errors to API errors.
///
/// Single-input problems are `INVALID_INPUT`; form-level problems are
/// `VALIDATION_ERROR` and carry the field list.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::NotANumber { .. }
            | ValidationError::OutOfRange { .. }
            | ValidationError::NotAllowed { .. } => ErrorCode::InvalidInput,
            ValidationError::Required { .. }
            | ValidationError::InvalidFormat { .. }
            | ValidationError::Invalid(_) => ErrorCode::ValidationError,
        };
        ApiError {
            code,
            message: err.to_string(),
            fields: err.field_errors(),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTaxRate { .. } => ApiError::invalid_input(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts export errors to API errors.
///
/// Every export failure is reported the same way: the PDF was not produced.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        tracing::error!(error = %err, "Export failed");
        ApiError::export(format!("Could not export PDF: {}", err))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_number_is_invalid_input() {
        let err: ApiError = ValidationError::NotANumber {
            field: "quantity".into(),
            value: "abc".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "quantity must be a number, got 'abc'");
    }

    #[test]
    fn test_out_of_range_is_invalid_input() {
        let err: ApiError = ValidationError::OutOfRange {
            field: "rate".into(),
            value: "1e200".into(),
            max: 1e12,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.fields[0].field, "rate");
    }

    #[test]
    fn test_form_validation_carries_fields() {
        let err: ApiError = CoreError::Validation(ValidationError::Invalid(vec![FieldError {
            field: "name".into(),
            message: "Client Name is required".into(),
        }]))
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.fields.len(), 1);
    }

    #[test]
    fn test_export_error_maps_to_single_code() {
        let err: ApiError = ExportError::Capture("detached".into()).into();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert!(err.message.contains("detached"));
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(ApiError::export_in_progress()).unwrap();
        assert_eq!(json["code"], "EXPORT_IN_PROGRESS");
        assert!(json.get("fields").is_none());
    }
}
