//! # Configuration File
//!
//! Loads `invoicer.toml`.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit path passed to bootstrap()                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/invoicer/invoicer.toml (Linux)                            │
//! │     ~/Library/Application Support/com.invoicer.app/invoicer.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (missing file or missing keys)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [invoice]
//! tax_rate = 0.18
//!
//! [currency]
//! symbol = "₹"
//! decimals = 2
//!
//! [export]
//! mode = "text"          # text | snapshot
//! output_dir = "."
//!
//! [logging]
//! filter = "info,invoicer=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use invoicer_core::{
    DEFAULT_CURRENCY_DECIMALS, DEFAULT_CURRENCY_SYMBOL, DEFAULT_TAX_RATE, MAX_TAX_RATE,
};
use invoicer_pdf::ExportMode;

use crate::error::ConfigError;

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info,invoicer=debug";

/// Most decimals a currency may display.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSettings {
    /// Tax multiplier (0.18 = 18%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        InvoiceSettings {
            tax_rate: default_tax_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_decimals() -> u8 {
    DEFAULT_CURRENCY_DECIMALS
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            symbol: default_symbol(),
            decimals: default_decimals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Which exporter `export_pdf` uses.
    #[serde(default)]
    pub mode: ExportMode,

    /// Where `invoice.pdf` is written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            mode: ExportMode::default(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive string.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete contents of `invoicer.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub invoice: InvoiceSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file and defaults.
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.invoice.tax_rate;
        if !rate.is_finite() || !(0.0..=MAX_TAX_RATE).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "tax_rate must be a finite multiplier between 0 and {}, got {}",
                MAX_TAX_RATE, rate
            )));
        }

        if self.currency.decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS, self.currency.decimals
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging filter must not be empty".into()));
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "invoicer", "app")
            .map(|dirs| dirs.config_dir().join("invoicer.toml"))
    }
}
