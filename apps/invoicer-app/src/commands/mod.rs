//! # Commands Module
//!
//! Every operation the invoice form can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── items.rs     ◄─── Line item editing, totals
//! ├── client.rs    ◄─── Client detail fields
//! ├── validate.rs  ◄─── Form validation
//! └── export.rs    ◄─── PDF export, surface registration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Form                                                                   │
//! │  ────                                                                   │
//! │  const invoice = await invoke('update_item', {                          │
//! │    index: 0, field: 'quantity', value: '2'                              │
//! │  });                                                                    │
//! │         │                                                               │
//! │         │ (host IPC)                                                    │
//! │         ▼                                                               │
//! │  Rust Backend                                                           │
//! │  ────────────                                                           │
//! │  fn update_item(                                                        │
//! │      session: &SessionState,   ◄── Injected by the host                 │
//! │      config: &ConfigState,     ◄── Injected by the host                 │
//! │      index: usize,             ◄── From invoke params                   │
//! │      field: &str,                                                       │
//! │      value: &str,                                                       │
//! │  ) -> Result<InvoiceResponse, ApiError>                                 │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  Form receives: { items, totals, display, validated }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod client;
pub mod export;
pub mod items;
pub mod validate;
