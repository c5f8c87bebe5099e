//! # Validate Command
//!
//! The "Validate & Preview" button.
//!
//! ```text
//! validate_form()
//!     │
//!     ├── all required fields present, date well-formed
//!     │       └──► validated = true, "Form is valid. Ready to export or preview."
//!     │
//!     └── anything missing
//!             └──► validated = false, one FieldError per input
//! ```
//!
//! The flag is informational. Export does not require it.

use serde::Serialize;
use tracing::{debug, info};

use invoicer_core::validation::validate_invoice;
use invoicer_core::FieldError;

use crate::state::SessionState;

/// Message shown when the form passes validation.
pub const VALID_FORM_MESSAGE: &str = "Form is valid. Ready to export or preview.";

/// Outcome of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub errors: Vec<FieldError>,
}

/// Runs the form rules and records the outcome on the session.
pub fn validate_form(session: &SessionState) -> ValidationResponse {
    debug!("validate_form command");

    session.with_session_mut(|s| {
        let result = validate_invoice(s.store().client(), s.store().items());
        match result {
            Ok(()) => {
                s.set_validated(true);
                info!(session_id = %s.id, "{}", VALID_FORM_MESSAGE);
                ValidationResponse {
                    valid: true,
                    message: Some(VALID_FORM_MESSAGE.to_string()),
                    errors: Vec::new(),
                }
            }
            Err(err) => {
                s.set_validated(false);
                let errors = err.field_errors();
                debug!(session_id = %s.id, failed = errors.len(), "Form validation failed");
                ValidationResponse {
                    valid: false,
                    message: None,
                    errors,
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::client::update_client_field;

    fn fill(session: &SessionState) {
        update_client_field(session, "name", "Acme").unwrap();
        update_client_field(session, "address", "1 Main St").unwrap();
        update_client_field(session, "invoiceNumber", "INV-1").unwrap();
        update_client_field(session, "date", "2024-01-01").unwrap();
    }

    #[test]
    fn test_blank_form_lists_every_missing_field() {
        let session = SessionState::default();
        let response = validate_form(&session);

        assert!(!response.valid);
        let fields: Vec<&str> = response.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "address", "invoiceNumber", "date"]);
        assert_eq!(response.errors[0].message, "Client Name is required");
    }

    #[test]
    fn test_complete_form_is_valid() {
        let session = SessionState::default();
        fill(&session);

        let response = validate_form(&session);
        assert!(response.valid);
        assert_eq!(response.message.as_deref(), Some(VALID_FORM_MESSAGE));
        assert!(session.with_session(|s| s.is_validated()));
    }

    #[test]
    fn test_bad_date_is_reported() {
        let session = SessionState::default();
        fill(&session);
        update_client_field(&session, "date", "31/01/2024").unwrap();

        let response = validate_form(&session);
        assert!(!response.valid);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].field, "date");
    }

    #[test]
    fn test_edit_after_validation_clears_flag() {
        let session = SessionState::default();
        fill(&session);
        validate_form(&session);

        update_client_field(&session, "name", "Acme Ltd").unwrap();
        assert!(!session.with_session(|s| s.is_validated()));
    }
}
