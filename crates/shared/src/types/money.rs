//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
/// Amounts are kept unrounded until they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "INR").
    pub currency: Currency,
}

/// ISO 4217 currency codes supported by the system.
///
/// The set is closed: a code outside this list can never reach the
/// valuation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Canadian Dollar
    Cad,
    /// Australian Dollar
    Aud,
    /// Indian Rupee
    Inr,
    /// Pakistani Rupee
    Pkr,
    /// Bangladeshi Taka
    Bdt,
    /// UAE Dirham
    Aed,
    /// Saudi Riyal
    Sar,
    /// Indonesian Rupiah
    Idr,
    /// Japanese Yen
    Jpy,
    /// South Korean Won
    Krw,
}

/// Returned when a string is not one of the supported currency codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown currency: {0}")]
pub struct ParseCurrencyError(pub String);

impl Currency {
    /// Every supported currency, in code order.
    pub const ALL: [Self; 13] = [
        Self::Aed,
        Self::Aud,
        Self::Bdt,
        Self::Cad,
        Self::Eur,
        Self::Gbp,
        Self::Idr,
        Self::Inr,
        Self::Jpy,
        Self::Krw,
        Self::Pkr,
        Self::Sar,
        Self::Usd,
    ];

    /// Returns the ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Inr => "INR",
            Self::Pkr => "PKR",
            Self::Bdt => "BDT",
            Self::Aed => "AED",
            Self::Sar => "SAR",
            Self::Idr => "IDR",
            Self::Jpy => "JPY",
            Self::Krw => "KRW",
        }
    }

    /// Conventional number of minor-unit digits.
    ///
    /// Yen and won have no minor unit in everyday pricing.
    #[must_use]
    pub const fn minor_units(self) -> u32 {
        match self {
            Self::Jpy | Self::Krw => 0,
            _ => 2,
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Rounds to the currency's minor units using banker's rounding.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            amount: self.amount.round_dp_with_strategy(
                self.currency.minor_units(),
                RoundingStrategy::MidpointNearestEven,
            ),
            currency: self.currency,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == upper)
            .ok_or_else(|| ParseCurrencyError(s.to_string()))
    }
}
