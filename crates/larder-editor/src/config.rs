//! # Editor Configuration
//!
//! Settings the order screens need: the tax rate, how money is displayed,
//! and whether wholesale grouping adds case-completion lines.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LARDER_*`)
//! 2. Config file (`larder.toml`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! # larder.toml
//! tax_rate_bps = 800          # 8%
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [wholesale]
//! calculate_adjustments = true
//! ```
//!
//! ## Environment Variables
//! - `LARDER_TAX_RATE`: percentage, e.g. `"8.25"`
//! - `LARDER_CURRENCY_SYMBOL`
//! - `LARDER_WHOLESALE_ADJUSTMENTS`: `true`/`false`
//!
//! Configuration is read-only after loading.

use std::path::{Path, PathBuf};

use larder_core::input::{parse_tax_rate_percent, validate_tax_rate_bps};
use larder_core::{GroupingOptions, Money, TaxRate};
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EditorError, EditorResult};

/// Tax rate used when nothing is configured.
pub const DEFAULT_TAX_RATE_BPS: u32 = 0;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "larder.toml";

/// Wholesale grouping switches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WholesaleConfig {
    /// Fold "add N EA" case-completion lines into grouped totals.
    pub calculate_adjustments: bool,
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tax rate applied to products and adjustments, in basis points.
    pub tax_rate_bps: u32,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    pub wholesale: WholesaleConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            wholesale: WholesaleConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Loads configuration: defaults, then the config file (if it exists),
    /// then environment overrides, then validation.
    ///
    /// `config_path` overrides the platform location.
    pub fn load(config_path: Option<PathBuf>) -> EditorResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading editor config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load editor config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Reads a config file without applying overrides.
    pub fn from_file(path: &Path) -> EditorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> EditorResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;

        info!(?path, "Editor config saved");
        Ok(())
    }

    /// Platform config location, e.g. `~/.config/larder/larder.toml` on Linux.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "larder", "larder")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EditorResult<()> {
        validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|e| EditorError::InvalidConfig(e.to_string()))?;

        if self.currency_decimals > 4 {
            return Err(EditorError::InvalidConfig(format!(
                "currency_decimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        Ok(())
    }

    /// Applies `LARDER_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unreadable values are logged
    /// and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup("LARDER_TAX_RATE") {
            match parse_tax_rate_percent(&rate) {
                Ok(parsed) => {
                    debug!(tax_rate_bps = parsed.bps(), "Overriding tax rate from environment");
                    self.tax_rate_bps = parsed.bps();
                }
                Err(e) => warn!(value = %rate, "Ignoring LARDER_TAX_RATE: {}", e),
            }
        }

        if let Some(symbol) = lookup("LARDER_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(flag) = lookup("LARDER_WHOLESALE_ADJUSTMENTS") {
            match parse_flag(&flag) {
                Some(enabled) => self.wholesale.calculate_adjustments = enabled,
                None => warn!(value = %flag, "Ignoring LARDER_WHOLESALE_ADJUSTMENTS"),
            }
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    pub fn grouping_options(&self) -> GroupingOptions {
        GroupingOptions {
            calculate_adjustments: self.wholesale.calculate_adjustments,
        }
    }

    /// Formats money for display, e.g. `$12.34` or `-$12.34`.
    ///
    /// Shows exactly `currency_decimals` places, rounding half away from
    /// zero when that is fewer than two.
    pub fn format_currency(&self, amount: Money) -> String {
        let places = u32::from(self.currency_decimals);
        let mut value = amount
            .to_decimal()
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(places);

        format!(
            "{}{}{}",
            if value.is_sign_negative() && !value.is_zero() { "-" } else { "" },
            self.currency_symbol,
            value.abs()
        )
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
