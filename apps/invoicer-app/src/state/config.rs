//! # Configuration State
//!
//! The loaded [`AppConfig`] plus the typed values derived from it.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::Path;

use invoicer_core::{Currency, TaxRate};
use invoicer_pdf::ExportMode;

use crate::config::AppConfig;
use crate::error::ConfigError;

/// Read-only configuration handed to commands.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: AppConfig,
    tax_rate: TaxRate,
    currency: Currency,
}

impl ConfigState {
    /// Validates the config and derives typed values from it.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let tax_rate = TaxRate::new(config.invoice.tax_rate)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let currency = Currency::new(config.currency.symbol.clone(), config.currency.decimals);

        Ok(ConfigState {
            config,
            tax_rate,
            currency,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn export_mode(&self) -> ExportMode {
        self.config.export.mode
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.export.output_dir
    }

    /// Formats an amount with the configured symbol, e.g. `₹236.00`.
    pub fn format_currency(&self, value: f64) -> String {
        self.currency.format(value)
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            config: AppConfig::default(),
            tax_rate: TaxRate::default(),
            currency: Currency::default(),
        }
    }
}
