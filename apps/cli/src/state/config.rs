//! # Application Configuration
//!
//! Shop settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`LUSTRE_*`)
//! 2. Config file (`--config`, else `config.toml` in the platform config dir)
//! 3. Defaults (this file)
//!
//! ```toml
//! footer = "Thank you for your business!"
//! labor_rate = 85
//! default_discount = 10
//!
//! [company]
//! name = "Lustre Jewelry Repair"
//! phone = "555-0100"
//!
//! [spot_prices]
//! gold = 4150
//! ```
//!
//! Read-only after loading, so commands take it by reference.

use directories::ProjectDirs;
use lustre_core::{CompanyInfo, DiscountPercent, Money, PricingContext, SpotPrices};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "lustre.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Closing line printed under the totals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,

    /// Numbering database file. Default: platform data dir
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Shop labor rate per hour
    pub labor_rate: Money,

    /// Discount applied when a request does not give one
    pub default_discount: DiscountPercent,

    /// The shop, printed at the top of every document
    pub company: CompanyInfo,

    /// Spot prices per troy ounce, for material charges
    pub spot_prices: SpotPrices,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Company: "Lustre Jewelry Repair", no contact details
    /// - Labor: $75.00/hr
    /// - Spot: gold 4000, silver 30, platinum 1000, palladium 1100
    /// - Discount: 0%
    fn default() -> Self {
        AppConfig {
            footer: Some("Thank you for your business!".to_string()),
            database_path: None,
            labor_rate: Money::from_dollars(lustre_core::DEFAULT_LABOR_RATE_DOLLARS),
            default_discount: DiscountPercent::zero(),
            company: CompanyInfo {
                name: "Lustre Jewelry Repair".to_string(),
                ..CompanyInfo::default()
            },
            spot_prices: SpotPrices::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the file (if any) and the environment.
    ///
    /// An explicit `path` must exist; the platform default is optional.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let mut config = match file {
            Some(p) => {
                info!(path = %p.display(), "Loading config file");
                Self::from_toml_str(&std::fs::read_to_string(&p).map_err(|e| {
                    CliError::config(format!("Cannot read {}: {e}", p.display()))
                })?)?
            }
            None => {
                debug!("No config file, using defaults");
                AppConfig::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CliResult<Self> {
        let config: AppConfig = toml::from_str(text)?;
        if config.labor_rate.is_negative() {
            return Err(CliError::config("labor_rate must not be negative"));
        }
        Ok(config)
    }

    /// Overrides fields from `LUSTRE_*` variables read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `LUSTRE_COMPANY_NAME`, `LUSTRE_COMPANY_ADDRESS`, `LUSTRE_COMPANY_PHONE`, `LUSTRE_COMPANY_EMAIL`
    /// - `LUSTRE_FOOTER`
    /// - `LUSTRE_DB_PATH`
    /// - `LUSTRE_LABOR_RATE` (e.g. "85")
    /// - `LUSTRE_GOLD_PRICE`, `LUSTRE_SILVER_PRICE`, `LUSTRE_PLATINUM_PRICE`, `LUSTRE_PALLADIUM_PRICE`
    /// - `LUSTRE_DEFAULT_DISCOUNT` (percent, e.g. "12.5")
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> CliResult<()> {
        if let Some(v) = lookup("LUSTRE_COMPANY_NAME") {
            self.company.name = v;
        }
        if let Some(v) = lookup("LUSTRE_COMPANY_ADDRESS") {
            self.company.address = v;
        }
        if let Some(v) = lookup("LUSTRE_COMPANY_PHONE") {
            self.company.phone = v;
        }
        if let Some(v) = lookup("LUSTRE_COMPANY_EMAIL") {
            self.company.email = v;
        }
        if let Some(v) = lookup("LUSTRE_FOOTER") {
            self.footer = Some(v).filter(|f| !f.trim().is_empty());
        }
        if let Some(v) = lookup("LUSTRE_DB_PATH") {
            self.database_path = Some(PathBuf::from(v));
        }

        let price = |key: &str| -> CliResult<Option<Money>> {
            lookup(key)
                .map(|v| env_decimal(key, &v).map(Money::from_decimal))
                .transpose()
        };
        if let Some(rate) = price("LUSTRE_LABOR_RATE")? {
            self.labor_rate = rate;
        }
        if let Some(p) = price("LUSTRE_GOLD_PRICE")? {
            self.spot_prices.gold = p;
        }
        if let Some(p) = price("LUSTRE_SILVER_PRICE")? {
            self.spot_prices.silver = p;
        }
        if let Some(p) = price("LUSTRE_PLATINUM_PRICE")? {
            self.spot_prices.platinum = p;
        }
        if let Some(p) = price("LUSTRE_PALLADIUM_PRICE")? {
            self.spot_prices.palladium = p;
        }

        if let Some(v) = lookup("LUSTRE_DEFAULT_DISCOUNT") {
            self.default_discount = DiscountPercent::new(env_decimal("LUSTRE_DEFAULT_DISCOUNT", &v)?)
                .map_err(|e| CliError::config(format!("LUSTRE_DEFAULT_DISCOUNT: {e}")))?;
        }

        Ok(())
    }

    /// Pricing context carrying this shop's labor rate and spot prices.
    pub fn pricing_context(&self) -> PricingContext<'static> {
        PricingContext::standard()
            .with_labor_rate(self.labor_rate)
            .with_spot_prices(self.spot_prices)
    }

    /// Database file to open: configured path, else the platform data dir.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.lustre.lustre/lustre.db`
    /// - **Windows**: `%APPDATA%\lustre\lustre\data\lustre.db`
    /// - **Linux**: `~/.local/share/lustre/lustre.db`
    pub fn database_path(&self) -> CliResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| CliError::config("Could not determine app data directory"))?;
        Ok(dirs.data_dir().join(DATABASE_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lustre", "lustre")
}

/// `config.toml` in the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

fn env_decimal(key: &str, value: &str) -> CliResult<Decimal> {
    let amount: Decimal = value
        .trim()
        .parse()
        .map_err(|_| CliError::config(format!("{key} is not a number: {value:?}")))?;
    if amount.is_sign_negative() {
        return Err(CliError::config(format!("{key} must not be negative")));
    }
    Ok(amount)
}
