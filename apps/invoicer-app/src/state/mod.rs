//! # State Module
//!
//! Manages the state a host binds to while the invoice form is open.
//!
//! ## Why Multiple State Types?
//! Commands declare exactly the state they need instead of reaching into one
//! big struct; the export status is independent of the invoice data so a
//! running export never blocks editing.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      App (bootstrap)                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionState │  │ ConfigState  │  │   ExportState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  tax rate    │  │  Idle/Generating │              │
//! │  │   Invoice    │  │  currency    │  │  surface capture │              │
//! │  │   Session>>  │  │  export dir  │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: Arc<Mutex<T>>, one mutation at a time                 │
//! │  • ConfigState: Read-only after initialization                         │
//! │  • ExportState: Short-lived locks, never held across an await          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod export;
mod session;

pub use config::ConfigState;
pub use export::{ExportGuard, ExportState, ExportStatus};
pub use session::{InvoiceSession, SessionState};
