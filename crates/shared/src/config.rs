//! Application configuration management.
//!
//! The valuation tables (exchange rates, country coin rates, commission and
//! fee constants) are static configuration. They are read once at startup
//! and never refreshed from an external source.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Fraction of coin value a creator keeps when nothing else is configured.
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Diamonds per coin when nothing else is configured ("2 coins = 1 diamond").
pub const DEFAULT_DIAMOND_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Withdrawal fee applied when the caller does not supply one.
pub const DEFAULT_WITHDRAWAL_FEE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Valuation tables and constants.
    #[serde(default)]
    pub valuation: ValuationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Raw valuation configuration.
///
/// Currency codes are kept as strings here; they are validated against the
/// closed `Currency` set when the rate table is built.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    /// Fraction of coin value a creator keeps (0.5 = 50%).
    #[serde(default = "default_commission_rate")]
    pub commission_rate: Decimal,
    /// Diamonds granted per coin (0.5 = 2 coins per diamond).
    #[serde(default = "default_diamond_ratio")]
    pub diamond_ratio: Decimal,
    /// Fee applied to withdrawals when the caller gives none.
    #[serde(default = "default_withdrawal_fee")]
    pub withdrawal_fee: Decimal,
    /// Currency code -> value of one coin in that currency.
    #[serde(default = "default_currency_rates")]
    pub currencies: BTreeMap<String, Decimal>,
    /// Countries with their local currency and coin price.
    #[serde(default = "default_countries")]
    pub countries: Vec<CountryConfig>,
    /// Currency code -> display decimal places, overriding the ISO default.
    #[serde(default)]
    pub decimal_places: BTreeMap<String, u32>,
}

/// Country entry in the valuation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryConfig {
    /// ISO 3166 alpha-2 country id (e.g. "PK").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Local currency code.
    pub currency: String,
    /// Price of one coin in the local currency.
    pub coin_rate: Decimal,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            commission_rate: default_commission_rate(),
            diamond_ratio: default_diamond_ratio(),
            withdrawal_fee: default_withdrawal_fee(),
            currencies: default_currency_rates(),
            countries: default_countries(),
            decimal_places: BTreeMap::new(),
        }
    }
}

fn default_commission_rate() -> Decimal {
    DEFAULT_COMMISSION_RATE
}

fn default_diamond_ratio() -> Decimal {
    DEFAULT_DIAMOND_RATIO
}

fn default_withdrawal_fee() -> Decimal {
    DEFAULT_WITHDRAWAL_FEE
}

fn default_currency_rates() -> BTreeMap<String, Decimal> {
    [
        ("USD", Decimal::new(105, 4)),
        ("EUR", Decimal::new(97, 4)),
        ("GBP", Decimal::new(83, 4)),
        ("CAD", Decimal::new(144, 4)),
        ("AUD", Decimal::new(161, 4)),
        ("INR", Decimal::new(88, 2)),
        ("PKR", Decimal::new(293, 2)),
        ("BDT", Decimal::new(126, 2)),
        ("AED", Decimal::new(386, 4)),
        ("SAR", Decimal::new(394, 4)),
        ("IDR", Decimal::new(171, 0)),
        ("JPY", Decimal::new(162, 2)),
        ("KRW", Decimal::new(146, 1)),
    ]
    .into_iter()
    .map(|(code, rate)| (code.to_string(), rate))
    .collect()
}

fn default_countries() -> Vec<CountryConfig> {
    [
        ("US", "United States", "USD", Decimal::new(133, 4)),
        ("GB", "United Kingdom", "GBP", Decimal::new(110, 4)),
        ("CA", "Canada", "CAD", Decimal::new(180, 4)),
        ("AU", "Australia", "AUD", Decimal::new(200, 4)),
        ("DE", "Germany", "EUR", Decimal::new(125, 4)),
        ("FR", "France", "EUR", Decimal::new(125, 4)),
        ("IN", "India", "INR", Decimal::new(110, 2)),
        ("PK", "Pakistan", "PKR", Decimal::new(375, 2)),
        ("BD", "Bangladesh", "BDT", Decimal::new(160, 2)),
        ("AE", "United Arab Emirates", "AED", Decimal::new(49, 3)),
        ("SA", "Saudi Arabia", "SAR", Decimal::new(50, 3)),
        ("ID", "Indonesia", "IDR", Decimal::new(215, 0)),
        ("JP", "Japan", "JPY", Decimal::new(2, 0)),
        ("KR", "South Korea", "KRW", Decimal::new(18, 0)),
    ]
    .into_iter()
    .map(|(id, name, currency, coin_rate)| CountryConfig {
        id: id.to_string(),
        name: name.to_string(),
        currency: currency.to_string(),
        coin_rate,
    })
    .collect()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINVALUE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document, without files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or does not match
    /// the configuration shape.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
