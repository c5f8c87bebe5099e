//! # Session State
//!
//! The invoice being edited, plus the bits of form state that live next to it.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Form Action              Command                 Session Change        │
//! │  ───────────              ───────                 ──────────────        │
//! │                                                                         │
//! │  Click "Add Item" ───────► add_item() ──────────► items.push(blank)    │
//! │                                                                         │
//! │  Type in a cell ─────────► update_item() ───────► items[i].field = v   │
//! │                                                  validated = false     │
//! │                                                                         │
//! │  Click "Remove" ─────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Click "Validate" ───────► validate_form() ─────► validated = ok?      │
//! │                                                                         │
//! │  Click "Export" ─────────► export_pdf() ────────► (snapshot, read only)│
//! │                                                                         │
//! │  NOTE: All operations acquire the Mutex briefly; nothing awaits while   │
//! │        holding it.                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use invoicer_core::{CoreResult, LineItemStore, TaxRate};

/// One open invoice form.
#[derive(Debug, Clone)]
pub struct InvoiceSession {
    /// Identifier for log correlation
    pub id: Uuid,

    /// When the form was opened or last reset
    pub started_at: DateTime<Utc>,

    store: LineItemStore,
    validated: bool,
}

impl InvoiceSession {
    pub fn new(tax_rate: TaxRate) -> Self {
        InvoiceSession {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            store: LineItemStore::new(tax_rate),
            validated: false,
        }
    }

    pub fn store(&self) -> &LineItemStore {
        &self.store
    }

    /// Whether the last validation passed and nothing changed since.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn set_validated(&mut self, validated: bool) {
        self.validated = validated;
    }

    /// Runs a store mutation. The validated flag is cleared only when the
    /// store actually changed; a rejected edit or an ignored out-of-range
    /// index leaves everything as it was.
    pub fn mutate<F, R>(&mut self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&mut LineItemStore) -> CoreResult<R>,
    {
        let before = self.store.clone();
        let result = f(&mut self.store)?;
        if self.store != before {
            self.validated = false;
        }
        Ok(result)
    }

    /// Starts a new invoice in the same session slot.
    pub fn reset(&mut self) {
        self.store.clear();
        self.validated = false;
        self.id = Uuid::new_v4();
        self.started_at = Utc::now();
    }
}

/// Shared handle to the open session.
///
/// ## Thread Safety
/// `Arc<Mutex<InvoiceSession>>`: edits are quick and almost all of them
/// write, so a `RwLock` would buy nothing. A poisoned lock is recovered;
/// the store never holds a half-applied edit.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<InvoiceSession>>,
}

impl SessionState {
    pub fn new(tax_rate: TaxRate) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(InvoiceSession::new(tax_rate))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = session.with_session(|s| s.store().totals());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session.with_session_mut(|s| s.mutate(|store| Ok(store.add_item())))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TaxRate::default())
    }
}
