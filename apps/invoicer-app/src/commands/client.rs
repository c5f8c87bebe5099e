//! # Client Commands
//!
//! The four client detail inputs: name, address, invoice number, date.
//! Values are stored as typed; checking them is `validate_form`'s job.

use tracing::debug;

use invoicer_core::{ClientField, ClientInfo};

use crate::error::AppResult;
use crate::state::SessionState;

/// Gets the client block.
pub fn get_client(session: &SessionState) -> ClientInfo {
    debug!("get_client command");
    session.with_session(|s| s.store().client().clone())
}

/// Overwrites one client field.
///
/// ## Arguments
/// * `field` - `name`, `address`, `invoiceNumber` or `date`
/// * `value` - New text, stored verbatim
pub fn update_client_field(
    session: &SessionState,
    field: &str,
    value: &str,
) -> AppResult<ClientInfo> {
    debug!(field, "update_client_field command");
    let field: ClientField = field.parse()?;

    session.with_session_mut(|s| -> AppResult<ClientInfo> {
        s.mutate(|store| {
            store.set_client_field(field, value);
            Ok(())
        })?;
        Ok(s.store().client().clone())
    })
}
