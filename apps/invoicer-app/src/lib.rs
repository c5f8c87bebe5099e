//! # Invoicer App Library
//!
//! Host-facing controller for the invoice form. A host (webview shell,
//! desktop wrapper, test harness) calls [`bootstrap`] once, keeps the
//! returned [`App`], and routes form events to [`commands`].
//!
//! ## Module Organization
//! ```text
//! invoicer_app/
//! ├── lib.rs          ◄─── You are here (bootstrap & logging)
//! ├── config.rs       ◄─── invoicer.toml loading
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── The invoice being edited
//! │   ├── config.rs   ◄─── Configuration state
//! │   └── export.rs   ◄─── Export status and surface
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── items.rs    ◄─── Line item commands
//! │   ├── client.rs   ◄─── Client field commands
//! │   ├── validate.rs ◄─── Form validation
//! │   └── export.rs   ◄─── PDF export
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • explicit path, else the platform config dir, else defaults       │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with the [logging] filter                      │
//! │                                                                         │
//! │  3. Initialize State Objects ─────────────────────────────────────────► │
//! │     • SessionState: one blank item, configured tax rate                 │
//! │     • ConfigState: typed view of the config                             │
//! │     • ExportState: Idle, no surface                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, DEFAULT_LOG_FILTER};
use error::AppResult;
use state::{ConfigState, ExportState, SessionState};

/// Everything a host keeps alive while the form is open.
#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub config: ConfigState,
    pub export: ExportState,
}

impl App {
    /// Builds state from an already-loaded config. Does not touch logging.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let config = ConfigState::new(config)?;
        let session = SessionState::new(config.tax_rate());
        Ok(App {
            session,
            config,
            export: ExportState::new(),
        })
    }
}

/// Loads configuration, initializes tracing and builds the app state.
pub fn bootstrap(config_path: Option<PathBuf>) -> AppResult<App> {
    let config = AppConfig::load(config_path)?;
    init_tracing(&config.logging.filter);

    let app = App::new(config)?;
    app.session.with_session(|s| {
        info!(
            session_id = %s.id,
            tax_rate = %app.config.tax_rate().label(),
            mode = %app.config.export_mode(),
            "Invoicer started"
        );
    });
    Ok(app)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `filter = "debug"` - Show debug messages
/// - `filter = "invoicer=trace"` - Show trace for invoicer crates only
/// - Default: `info,invoicer=debug`
///
/// Calling it again is harmless; the first subscriber stays installed.
pub fn init_tracing(filter: &str) {
    let (filter, rejected) = match EnvFilter::try_new(filter) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(err)),
    };

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        return;
    }

    if let Some(err) = rejected {
        warn!(error = %err, "Invalid log filter, using default");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoicer.toml");
        std::fs::write(
            &path,
            "[invoice]\ntax_rate = 0.05\n\n[currency]\nsymbol = \"$\"\n",
        )
        .unwrap();

        let app = bootstrap(Some(path)).unwrap();
        assert_eq!(app.config.tax_rate().multiplier(), 0.05);
        let invoice = commands::items::get_invoice(&app.session, &app.config);
        assert_eq!(invoice.display.total, "$0.00");
        assert_eq!(invoice.display.tax_label, "Tax (5%)");
    }

    #[test]
    fn test_bootstrap_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoicer.toml");
        std::fs::write(&path, "[currency]\ndecimals = 9\n").unwrap();

        let err = bootstrap(Some(path)).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        init_tracing("not a [valid filter");
        init_tracing(DEFAULT_LOG_FILTER);
    }
}
