//! Coin rates, conversion, creator earnings, and display formatting.

pub mod conversion;
pub mod earnings;
pub mod exchange;
pub mod format;
pub mod rates;

#[cfg(test)]
mod props;

pub use conversion::ConversionEngine;
pub use earnings::{
    DEFAULT_COMMISSION_RATE, DEFAULT_WITHDRAWAL_FEE, EarningsBreakdown, EarningsEngine,
    validate_fee,
};
pub use exchange::ExchangeRate;
pub use format::{DisplayConvention, Formatter, Grouping, SymbolPlacement};
pub use rates::{CountryRate, RateTable};
