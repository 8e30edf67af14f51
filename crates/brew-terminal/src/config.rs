//! # Terminal Configuration
//!
//! Configuration for the cashier terminal: service endpoints, the add-on
//! price table, and HTTP timeouts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BREW_POS_SALES_URL=http://127.0.0.1:9000                           │
//! │     BREW_POS_DISCOUNTS_URL=http://127.0.0.1:9002                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/brew-pos/terminal.toml (Linux)                           │
//! │     ~/Library/Application Support/com.brew.pos/terminal.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Local dev endpoints, standard add-on prices                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # terminal.toml
//! [endpoints]
//! sales_url = "http://127.0.0.1:9000"
//! discounts_url = "http://127.0.0.1:9002"
//!
//! [addon_prices]
//! espresso_shots_cents = 1500   # ₱15.00 per shot
//! sea_salt_cream_cents = 2000   # ₱20.00
//! syrup_sauces_cents = 1000     # ₱10.00
//!
//! [http]
//! connect_timeout_secs = 5
//! request_timeout_secs = 15
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use brew_core::{AddonKind, AddonPriceTable, Money};

// =============================================================================
// Endpoints
// =============================================================================

/// Base URLs of the external services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Sales service (transaction submission).
    #[serde(default = "default_sales_url")]
    pub sales_url: String,

    /// Discount service (catalog fetch).
    #[serde(default = "default_discounts_url")]
    pub discounts_url: String,
}

fn default_sales_url() -> String {
    "http://127.0.0.1:9000".to_string()
}

fn default_discounts_url() -> String {
    "http://127.0.0.1:9002".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig {
            sales_url: default_sales_url(),
            discounts_url: default_discounts_url(),
        }
    }
}

// =============================================================================
// Add-on Prices
// =============================================================================

/// Configured unit prices for drink add-ons, in centavos.
///
/// The engine treats an unconfigured add-on as free (fail-open): a missing
/// price entry must never block checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddonPriceConfig {
    #[serde(default = "default_espresso_cents")]
    pub espresso_shots_cents: i64,

    #[serde(default = "default_sea_salt_cents")]
    pub sea_salt_cream_cents: i64,

    #[serde(default = "default_syrup_cents")]
    pub syrup_sauces_cents: i64,
}

fn default_espresso_cents() -> i64 {
    1500
}

fn default_sea_salt_cents() -> i64 {
    2000
}

fn default_syrup_cents() -> i64 {
    1000
}

impl Default for AddonPriceConfig {
    fn default() -> Self {
        AddonPriceConfig {
            espresso_shots_cents: default_espresso_cents(),
            sea_salt_cream_cents: default_sea_salt_cents(),
            syrup_sauces_cents: default_syrup_cents(),
        }
    }
}

impl AddonPriceConfig {
    /// Builds the engine's price table from the configured centavo values.
    pub fn to_table(&self) -> AddonPriceTable {
        let mut table = AddonPriceTable::default();
        table.set(
            AddonKind::EspressoShots,
            Money::from_cents(self.espresso_shots_cents),
        );
        table.set(
            AddonKind::SeaSaltCream,
            Money::from_cents(self.sea_salt_cream_cents),
        );
        table.set(
            AddonKind::SyrupSauces,
            Money::from_cents(self.syrup_sauces_cents),
        );
        table
    }
}

// =============================================================================
// HTTP Settings
// =============================================================================

/// Timeouts for the boundary clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    15
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Terminal Config
// =============================================================================

/// Full terminal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub endpoints: EndpointConfig,

    #[serde(default)]
    pub addon_prices: AddonPriceConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

impl TerminalConfig {
    /// Default path of the config file, per platform.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "brew", "pos")
            .map(|dirs| dirs.config_dir().join("terminal.toml"))
    }

    /// Loads configuration: file if present, then env overrides, then
    /// defaults for everything unset.
    ///
    /// A malformed or unreadable file logs a warning and falls back to
    /// defaults; configuration problems must not keep the register from
    /// opening.
    pub fn load_or_default() -> Self {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => match std::fs::read_to_string(&path) {
                Ok(raw) => match toml::from_str::<TerminalConfig>(&raw) {
                    Ok(config) => {
                        debug!(path = %path.display(), "Loaded terminal config");
                        config
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Malformed terminal config, using defaults");
                        TerminalConfig::default()
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Cannot read terminal config, using defaults");
                    TerminalConfig::default()
                }
            },
            _ => TerminalConfig::default(),
        };

        config.apply_env_overrides();
        config
    }

    /// Applies `BREW_POS_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("BREW_POS_SALES_URL") {
            self.endpoints.sales_url = url;
        }
        if let Ok(url) = std::env::var("BREW_POS_DISCOUNTS_URL") {
            self.endpoints.discounts_url = url;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.endpoints.sales_url, "http://127.0.0.1:9000");
        assert_eq!(config.endpoints.discounts_url, "http://127.0.0.1:9002");
        assert_eq!(config.http.connect_timeout_secs, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TerminalConfig = toml::from_str(
            r#"
            [endpoints]
            sales_url = "http://sales.internal:9000"

            [addon_prices]
            espresso_shots_cents = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.endpoints.sales_url, "http://sales.internal:9000");
        // Unset fields fall back to defaults
        assert_eq!(config.endpoints.discounts_url, "http://127.0.0.1:9002");
        assert_eq!(config.addon_prices.sea_salt_cream_cents, 2000);

        let table = config.addon_prices.to_table();
        assert_eq!(
            table.unit_price(AddonKind::EspressoShots),
            Money::from_cents(2500)
        );
    }

    #[test]
    fn test_price_table_conversion() {
        let table = AddonPriceConfig::default().to_table();
        assert_eq!(
            table.unit_price(AddonKind::SeaSaltCream),
            Money::from_cents(2000)
        );
        assert_eq!(
            table.unit_price(AddonKind::SyrupSauces),
            Money::from_cents(1000)
        );
    }
}
