//! Valuation error types.

use coinvalue_shared::types::money::ParseCurrencyError;
use coinvalue_shared::{AppError, Currency};
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias using `ValuationError`.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Errors raised by the valuation engine.
///
/// Every variant is a validation or domain failure raised at the point of
/// violation. None of them are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// Currency code is not configured (or not a supported code at all).
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Country id is not configured.
    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    /// A rate or ratio is outside its allowed range.
    #[error("Invalid rate for {name}: {rate}")]
    InvalidRate {
        /// What the rate is for (a currency code, "commission_rate", ...).
        name: String,
        /// Offending value.
        rate: Decimal,
    },

    /// Withdrawal fee outside `[0, 1)`.
    #[error("Withdrawal fee must be in [0, 1), got {0}")]
    InvalidFee(Decimal),

    /// Amount is below zero.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// No display convention is known for the currency.
    #[error("No display format for currency {0}")]
    UnsupportedCurrencyFormat(Currency),

    /// A gift or package record breaks a catalog invariant.
    #[error("Invalid catalog entry {id}: {reason}")]
    InvalidCatalogEntry {
        /// Record identifier.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Records that must share a currency do not.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch {
        /// Expected currency.
        expected: Currency,
        /// Actual currency.
        got: Currency,
    },

    /// Static configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Result does not fit in a decimal.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl From<ParseCurrencyError> for ValuationError {
    fn from(err: ParseCurrencyError) -> Self {
        Self::UnknownCurrency(err.0)
    }
}

impl From<ValuationError> for AppError {
    fn from(err: ValuationError) -> Self {
        let message = err.to_string();
        match err {
            ValuationError::UnknownCurrency(_) | ValuationError::UnknownCountry(_) => {
                Self::NotFound(message)
            }
            ValuationError::InvalidFee(_)
            | ValuationError::NegativeAmount(_)
            | ValuationError::InvalidCatalogEntry { .. }
            | ValuationError::CurrencyMismatch { .. } => Self::Validation(message),
            ValuationError::InvalidRate { .. }
            | ValuationError::UnsupportedCurrencyFormat(_)
            | ValuationError::InvalidConfig(_) => Self::BusinessRule(message),
            ValuationError::Overflow => Self::Internal(message),
        }
    }
}
