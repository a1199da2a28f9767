//! Coin exchange rate type.

use coinvalue_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};

/// Value of one coin in a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Target currency.
    pub currency: Currency,
    /// Currency units per coin (1 coin = rate currency).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate, rejecting non-positive rates.
    pub fn new(currency: Currency, rate: Decimal) -> ValuationResult<Self> {
        if rate <= Decimal::ZERO {
            return Err(ValuationError::InvalidRate {
                name: currency.code().to_string(),
                rate,
            });
        }
        Ok(Self { currency, rate })
    }

    /// Returns how many coins one currency unit buys.
    pub fn coins_per_unit(&self) -> ValuationResult<Decimal> {
        Decimal::ONE
            .checked_div(self.rate)
            .ok_or_else(|| ValuationError::InvalidRate {
                name: self.currency.code().to_string(),
                rate: self.rate,
            })
    }
}
