//! Coin conversion logic.
//!
//! CRITICAL: amounts stay unrounded here. Rounding to a currency's minor
//! units happens only when a value is displayed.
//!
//! Coin to diamond conversion floors, so diamonds back to coins never
//! exceeds the original coin amount. It is not an inverse.

use std::sync::Arc;

use coinvalue_shared::{Currency, Money};
use rust_decimal::Decimal;

use super::rates::RateTable;
use crate::error::{ValuationError, ValuationResult};

/// Converts coins to currencies and diamonds.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    rates: Arc<RateTable>,
    diamond_ratio: Decimal,
}

impl ConversionEngine {
    /// Creates an engine over a rate table.
    ///
    /// `diamond_ratio` is diamonds per coin and must be positive.
    pub fn new(rates: Arc<RateTable>, diamond_ratio: Decimal) -> ValuationResult<Self> {
        if diamond_ratio <= Decimal::ZERO {
            return Err(ValuationError::InvalidRate {
                name: "diamond_ratio".to_string(),
                rate: diamond_ratio,
            });
        }
        Ok(Self {
            rates,
            diamond_ratio,
        })
    }

    /// The rate table this engine reads.
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Diamonds per coin.
    pub fn diamond_ratio(&self) -> Decimal {
        self.diamond_ratio
    }

    /// Converts coins to an amount of `currency`.
    pub fn coin_to_currency(&self, coins: Decimal, currency: Currency) -> ValuationResult<Money> {
        ensure_non_negative(coins)?;
        let rate = self.rates.rate_for(currency)?;
        let amount = coins.checked_mul(rate.rate).ok_or(ValuationError::Overflow)?;
        Ok(Money::new(amount, currency))
    }

    /// Converts an amount of `currency` to coins.
    pub fn currency_to_coin(&self, amount: Decimal, currency: Currency) -> ValuationResult<Decimal> {
        ensure_non_negative(amount)?;
        let rate = self.rates.rate_for(currency)?;
        // The table validates rates, but it is built from external config.
        if rate.rate <= Decimal::ZERO {
            return Err(ValuationError::InvalidRate {
                name: currency.code().to_string(),
                rate: rate.rate,
            });
        }
        amount.checked_div(rate.rate).ok_or(ValuationError::Overflow)
    }

    /// Converts coins to the local currency of a country at its coin price.
    pub fn coin_to_local(&self, coins: Decimal, country_id: &str) -> ValuationResult<Money> {
        ensure_non_negative(coins)?;
        let (currency, coin_rate) = self.rates.coin_rate_for(country_id)?;
        let amount = coins.checked_mul(coin_rate).ok_or(ValuationError::Overflow)?;
        Ok(Money::new(amount, currency))
    }

    /// Converts coins to whole diamonds, flooring any fraction.
    pub fn coin_to_diamond(&self, coins: Decimal) -> ValuationResult<Decimal> {
        ensure_non_negative(coins)?;
        coins
            .checked_mul(self.diamond_ratio)
            .map(|d| d.floor())
            .ok_or(ValuationError::Overflow)
    }

    /// Converts diamonds to the coin amount they represent.
    pub fn diamond_to_coin(&self, diamonds: Decimal) -> ValuationResult<Decimal> {
        ensure_non_negative(diamonds)?;
        diamonds
            .checked_div(self.diamond_ratio)
            .ok_or(ValuationError::Overflow)
    }
}

/// Rejects amounts below zero. Negative zero is allowed.
pub(crate) fn ensure_non_negative(amount: Decimal) -> ValuationResult<()> {
    if amount < Decimal::ZERO {
        return Err(ValuationError::NegativeAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinvalue_shared::ValuationConfig;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn engine() -> ConversionEngine {
        let rates = RateTable::from_config(&ValuationConfig::default()).unwrap();
        ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap()
    }

    #[test]
    fn test_coin_to_currency() {
        // 1000 coins * 0.0105 = 10.5 USD
        let money = engine().coin_to_currency(dec!(1000), Currency::Usd).unwrap();
        assert_eq!(money, Money::new(dec!(10.5), Currency::Usd));
    }

    #[test]
    fn test_coin_to_currency_is_unrounded() {
        // 1 coin * 0.0105 keeps all four places
        let money = engine().coin_to_currency(dec!(1), Currency::Usd).unwrap();
        assert_eq!(money.amount, dec!(0.0105));
    }

    #[test]
    fn test_coin_to_currency_rejects_negative() {
        assert_eq!(
            engine().coin_to_currency(dec!(-5), Currency::Usd).unwrap_err(),
            ValuationError::NegativeAmount(dec!(-5))
        );
    }

    #[test]
    fn test_coin_to_currency_unknown_currency() {
        let rates = RateTable::new([(Currency::Usd, dec!(0.01))], []).unwrap();
        let engine = ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap();
        assert_eq!(
            engine.coin_to_currency(dec!(1), Currency::Gbp).unwrap_err(),
            ValuationError::UnknownCurrency("GBP".into())
        );
    }

    #[test]
    fn test_coin_to_currency_overflow_is_an_error() {
        let err = engine()
            .coin_to_currency(Decimal::MAX, Currency::Idr)
            .unwrap_err();
        assert_eq!(err, ValuationError::Overflow);
    }

    #[test]
    fn test_currency_to_coin() {
        // 10.5 USD / 0.0105 = 1000 coins
        let coins = engine().currency_to_coin(dec!(10.5), Currency::Usd).unwrap();
        assert_eq!(coins, dec!(1000));
    }

    #[test]
    fn test_currency_to_coin_guards_zero_rate() {
        let mut rates = RateTable::from_config(&ValuationConfig::default()).unwrap();
        rates.insert_unchecked(Currency::Usd, Decimal::ZERO);
        let engine = ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap();
        assert_eq!(
            engine.currency_to_coin(dec!(10), Currency::Usd).unwrap_err(),
            ValuationError::InvalidRate {
                name: "USD".into(),
                rate: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn test_coin_to_local() {
        // 100 coins at 3.75 PKR each
        let money = engine().coin_to_local(dec!(100), "pk").unwrap();
        assert_eq!(money, Money::new(dec!(375), Currency::Pkr));
        assert_eq!(
            engine().coin_to_local(dec!(1), "XX").unwrap_err(),
            ValuationError::UnknownCountry("XX".into())
        );
    }

    #[rstest]
    #[case(dec!(0), dec!(0))]
    #[case(dec!(1), dec!(0))]
    #[case(dec!(2), dec!(1))]
    #[case(dec!(101), dec!(50))]
    #[case(dec!(7.9), dec!(3))]
    fn test_coin_to_diamond_floors(#[case] coins: Decimal, #[case] diamonds: Decimal) {
        assert_eq!(engine().coin_to_diamond(coins).unwrap(), diamonds);
    }

    #[test]
    fn test_diamond_round_trip_is_lossy() {
        let engine = engine();
        let diamonds = engine.coin_to_diamond(dec!(101)).unwrap();
        let coins = engine.diamond_to_coin(diamonds).unwrap();
        assert_eq!(coins, dec!(100));
        assert!(coins < dec!(101));
    }

    #[test]
    fn test_diamond_conversions_reject_negative() {
        let engine = engine();
        assert!(matches!(
            engine.coin_to_diamond(dec!(-2)),
            Err(ValuationError::NegativeAmount(_))
        ));
        assert!(matches!(
            engine.diamond_to_coin(dec!(-1)),
            Err(ValuationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_new_rejects_non_positive_ratio() {
        let rates = Arc::new(RateTable::from_config(&ValuationConfig::default()).unwrap());
        assert!(matches!(
            ConversionEngine::new(rates, Decimal::ZERO),
            Err(ValuationError::InvalidRate { .. })
        ));
    }
}
