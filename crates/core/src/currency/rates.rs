//! Static coin rate table.
//!
//! Built once from configuration and read-only afterwards. Lookups never
//! fall back to a default: a missing currency or country is a typed error.

use std::collections::BTreeMap;
use std::str::FromStr;

use coinvalue_shared::{Currency, ValuationConfig};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::exchange::ExchangeRate;
use crate::error::{ValuationError, ValuationResult};

/// A country's local currency and coin price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRate {
    /// Upper-case ISO 3166 alpha-2 id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Local currency.
    pub currency: Currency,
    /// Price of one coin in the local currency.
    pub coin_rate: Decimal,
}

/// Immutable table of coin exchange rates and country coin prices.
#[derive(Debug, Clone)]
pub struct RateTable {
    currencies: BTreeMap<Currency, ExchangeRate>,
    countries: BTreeMap<String, CountryRate>,
}

impl RateTable {
    /// Builds a table from already-typed entries.
    ///
    /// Rejects non-positive rates, duplicate countries, and countries whose
    /// currency has no exchange rate.
    pub fn new(
        currencies: impl IntoIterator<Item = (Currency, Decimal)>,
        countries: impl IntoIterator<Item = CountryRate>,
    ) -> ValuationResult<Self> {
        let mut currency_rates = BTreeMap::new();
        for (currency, rate) in currencies {
            currency_rates.insert(currency, ExchangeRate::new(currency, rate)?);
        }

        let mut country_rates = BTreeMap::new();
        for mut country in countries {
            country.id = normalize_country_id(&country.id);
            if country.coin_rate <= Decimal::ZERO {
                return Err(ValuationError::InvalidRate {
                    name: country.id,
                    rate: country.coin_rate,
                });
            }
            if !currency_rates.contains_key(&country.currency) {
                return Err(ValuationError::UnknownCurrency(
                    country.currency.code().to_string(),
                ));
            }
            if country_rates.contains_key(&country.id) {
                return Err(ValuationError::InvalidConfig(format!(
                    "duplicate country {}",
                    country.id
                )));
            }
            country_rates.insert(country.id.clone(), country);
        }

        Ok(Self {
            currencies: currency_rates,
            countries: country_rates,
        })
    }

    /// Builds a table from the raw valuation configuration.
    pub fn from_config(config: &ValuationConfig) -> ValuationResult<Self> {
        let currencies = config
            .currencies
            .iter()
            .map(|(code, rate)| Ok((Currency::from_str(code)?, *rate)))
            .collect::<ValuationResult<Vec<_>>>()?;

        let countries = config
            .countries
            .iter()
            .map(|c| {
                Ok(CountryRate {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    currency: Currency::from_str(&c.currency)?,
                    coin_rate: c.coin_rate,
                })
            })
            .collect::<ValuationResult<Vec<_>>>()?;

        let table = Self::new(currencies, countries)?;
        debug!(
            currencies = table.currencies.len(),
            countries = table.countries.len(),
            "Rate table loaded"
        );
        Ok(table)
    }

    /// Returns the coin exchange rate for a currency.
    pub fn rate_for(&self, currency: Currency) -> ValuationResult<ExchangeRate> {
        self.currencies
            .get(&currency)
            .copied()
            .ok_or_else(|| ValuationError::UnknownCurrency(currency.code().to_string()))
    }

    /// Returns the coin exchange rate for a currency code string.
    pub fn rate_for_code(&self, code: &str) -> ValuationResult<ExchangeRate> {
        self.rate_for(Currency::from_str(code)?)
    }

    /// Returns a country's currency and local coin price.
    pub fn coin_rate_for(&self, country_id: &str) -> ValuationResult<(Currency, Decimal)> {
        self.country(country_id).map(|c| (c.currency, c.coin_rate))
    }

    /// Returns the full country entry.
    pub fn country(&self, country_id: &str) -> ValuationResult<&CountryRate> {
        self.countries
            .get(&normalize_country_id(country_id))
            .ok_or_else(|| ValuationError::UnknownCountry(country_id.to_string()))
    }

    /// Configured exchange rates, ordered by currency code.
    pub fn currencies(&self) -> Vec<ExchangeRate> {
        let mut rates: Vec<ExchangeRate> = self.currencies.values().copied().collect();
        rates.sort_by_key(|r| r.currency.code());
        rates
    }

    /// Configured countries, ordered by id.
    pub fn countries(&self) -> impl Iterator<Item = &CountryRate> {
        self.countries.values()
    }

    /// Inserts a rate without validation, for exercising defensive guards.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, currency: Currency, rate: Decimal) {
        self.currencies
            .insert(currency, ExchangeRate { currency, rate });
    }
}

fn normalize_country_id(id: &str) -> String {
    id.trim().to_uppercase()
}
