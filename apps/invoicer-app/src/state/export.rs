//! # Export State
//!
//! Tracks whether an export is running and which rendered surface the
//! snapshot exporter should capture.
//!
//! ```text
//!            try_begin()                     guard dropped
//!   ┌──────┐ ───────────► ┌────────────┐ ─────────────────► ┌──────┐
//!   │ Idle │              │ Generating │                    │ Idle │
//!   └──────┘ ◄─ rejected ─└────────────┘                    └──────┘
//!              (second try_begin while Generating)
//! ```
//!
//! The transition back to `Idle` is tied to the guard's lifetime, so a
//! failed or panicking export can never leave the form stuck.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use invoicer_pdf::SurfaceCapture;

/// Current export status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ExportStatus {
    Idle,
    Generating { started_at: DateTime<Utc> },
}

/// Export status plus the optional host surface.
#[derive(Default)]
pub struct ExportState {
    status: Mutex<Option<DateTime<Utc>>>,
    surface: Mutex<Option<Arc<dyn SurfaceCapture>>>,
}

impl ExportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ExportStatus {
        match *self.status.lock().unwrap_or_else(PoisonError::into_inner) {
            Some(started_at) => ExportStatus::Generating { started_at },
            None => ExportStatus::Idle,
        }
    }

    /// Moves `Idle → Generating`. Returns `None` if an export is running.
    pub fn try_begin(&self) -> Option<ExportGuard<'_>> {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if status.is_some() {
            return None;
        }
        *status = Some(Utc::now());
        debug!("Export started");
        Some(ExportGuard { state: self })
    }

    /// Registers the rendered region the snapshot exporter captures.
    pub fn register_surface(&self, capture: Arc<dyn SurfaceCapture>) {
        *self.surface.lock().unwrap_or_else(PoisonError::into_inner) = Some(capture);
    }

    pub fn clear_surface(&self) {
        *self.surface.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn surface(&self) -> Option<Arc<dyn SurfaceCapture>> {
        self.surface
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn finish(&self) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = None;
        debug!("Export finished");
    }
}

impl std::fmt::Debug for ExportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportState")
            .field("status", &self.status())
            .field("has_surface", &self.surface().is_some())
            .finish()
    }
}

/// Holds the `Generating` state; dropping it returns to `Idle`.
#[must_use = "the export is marked finished as soon as the guard is dropped"]
pub struct ExportGuard<'a> {
    state: &'a ExportState,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.state.finish();
    }
}
