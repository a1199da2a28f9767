//! Creator earnings after commission and withdrawal fees.

use coinvalue_shared::{Currency, Money};
use rust_decimal::Decimal;
use serde::Serialize;

pub use coinvalue_shared::{DEFAULT_COMMISSION_RATE, DEFAULT_WITHDRAWAL_FEE};

use super::conversion::ConversionEngine;
use crate::error::{ValuationError, ValuationResult};

/// Full split of a coin amount between platform, fee, and creator payout.
///
/// `gross = platform_commission + creator_share` and
/// `creator_share = withdrawal_fee + payout` hold exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsBreakdown {
    /// Coins received.
    pub coins: Decimal,
    /// Currency of every amount below.
    pub currency: Currency,
    /// Full currency value of the coins.
    pub gross: Decimal,
    /// Part kept by the platform.
    pub platform_commission: Decimal,
    /// Part credited to the creator.
    pub creator_share: Decimal,
    /// Fee rate applied to the withdrawal.
    pub fee_rate: Decimal,
    /// Amount deducted by the withdrawal fee.
    pub withdrawal_fee: Decimal,
    /// Amount paid out.
    pub payout: Decimal,
}

/// Applies the creator commission and withdrawal fee to coin values.
#[derive(Debug, Clone)]
pub struct EarningsEngine {
    conversion: ConversionEngine,
    commission_rate: Decimal,
    default_fee: Decimal,
}

impl EarningsEngine {
    /// Creates an earnings engine.
    ///
    /// `commission_rate` is the creator's share and must be in `[0, 1]`;
    /// `default_fee` must be in `[0, 1)`.
    pub fn new(
        conversion: ConversionEngine,
        commission_rate: Decimal,
        default_fee: Decimal,
    ) -> ValuationResult<Self> {
        if commission_rate < Decimal::ZERO || commission_rate > Decimal::ONE {
            return Err(ValuationError::InvalidRate {
                name: "commission_rate".to_string(),
                rate: commission_rate,
            });
        }
        validate_fee(default_fee)?;
        Ok(Self {
            conversion,
            commission_rate,
            default_fee,
        })
    }

    /// Creator's share of the coin value.
    pub fn commission_rate(&self) -> Decimal {
        self.commission_rate
    }

    /// Fee used by [`Self::withdrawal_amount_default`].
    pub fn default_fee(&self) -> Decimal {
        self.default_fee
    }

    /// Currency value credited to the creator for `coins`.
    pub fn creator_earnings(&self, coins: Decimal, currency: Currency) -> ValuationResult<Money> {
        let gross = self.conversion.coin_to_currency(coins, currency)?;
        let share = gross
            .amount
            .checked_mul(self.commission_rate)
            .ok_or(ValuationError::Overflow)?;
        Ok(Money::new(share, currency))
    }

    /// Amount paid out after deducting `fee` from the creator's earnings.
    pub fn withdrawal_amount(
        &self,
        coins: Decimal,
        currency: Currency,
        fee: Decimal,
    ) -> ValuationResult<Money> {
        validate_fee(fee)?;
        let earnings = self.creator_earnings(coins, currency)?;
        let payout = earnings
            .amount
            .checked_mul(Decimal::ONE - fee)
            .ok_or(ValuationError::Overflow)?;
        Ok(Money::new(payout, currency))
    }

    /// Same as [`Self::withdrawal_amount`] with the configured default fee.
    pub fn withdrawal_amount_default(
        &self,
        coins: Decimal,
        currency: Currency,
    ) -> ValuationResult<Money> {
        self.withdrawal_amount(coins, currency, self.default_fee)
    }

    /// Splits `coins` into platform commission, fee, and payout.
    pub fn breakdown(
        &self,
        coins: Decimal,
        currency: Currency,
        fee: Option<Decimal>,
    ) -> ValuationResult<EarningsBreakdown> {
        let fee_rate = fee.unwrap_or(self.default_fee);
        let gross = self.conversion.coin_to_currency(coins, currency)?.amount;
        let creator_share = self.creator_earnings(coins, currency)?.amount;
        let payout = self.withdrawal_amount(coins, currency, fee_rate)?.amount;

        Ok(EarningsBreakdown {
            coins,
            currency,
            gross,
            platform_commission: gross - creator_share,
            creator_share,
            fee_rate,
            withdrawal_fee: creator_share - payout,
            payout,
        })
    }
}

/// Rejects fees outside `[0, 1)`.
pub fn validate_fee(fee: Decimal) -> ValuationResult<()> {
    if fee < Decimal::ZERO || fee >= Decimal::ONE {
        return Err(ValuationError::InvalidFee(fee));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::currency::rates::RateTable;
    use coinvalue_shared::ValuationConfig;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn engine() -> EarningsEngine {
        let rates = RateTable::from_config(&ValuationConfig::default()).unwrap();
        let conversion = ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap();
        EarningsEngine::new(conversion, DEFAULT_COMMISSION_RATE, DEFAULT_WITHDRAWAL_FEE).unwrap()
    }

    #[test]
    fn test_creator_earnings_is_half_of_value() {
        // 1000 coins = 10.50 USD, creator keeps 5.25
        let earnings = engine().creator_earnings(dec!(1000), Currency::Usd).unwrap();
        assert_eq!(earnings, Money::new(dec!(5.25), Currency::Usd));
    }

    #[test]
    fn test_withdrawal_amount_with_default_fee() {
        // 5.25 * 0.95 = 4.9875
        let engine = engine();
        let payout = engine.withdrawal_amount_default(dec!(1000), Currency::Usd).unwrap();
        assert_eq!(payout.amount, dec!(4.9875));
        assert_eq!(
            payout,
            engine
                .withdrawal_amount(dec!(1000), Currency::Usd, DEFAULT_WITHDRAWAL_FEE)
                .unwrap()
        );
    }

    #[test]
    fn test_zero_fee_pays_full_earnings() {
        let engine = engine();
        let payout = engine
            .withdrawal_amount(dec!(200), Currency::Inr, Decimal::ZERO)
            .unwrap();
        let earnings = engine.creator_earnings(dec!(200), Currency::Inr).unwrap();
        assert_eq!(payout, earnings);
    }

    #[rstest]
    #[case(dec!(-0.1))]
    #[case(dec!(1))]
    #[case(dec!(1.5))]
    fn test_withdrawal_rejects_invalid_fee(#[case] fee: Decimal) {
        assert_eq!(
            engine()
                .withdrawal_amount(dec!(100), Currency::Usd, fee)
                .unwrap_err(),
            ValuationError::InvalidFee(fee)
        );
    }

    #[test]
    fn test_negative_coins_fail_before_fee_math() {
        assert_eq!(
            engine().creator_earnings(dec!(-1), Currency::Usd).unwrap_err(),
            ValuationError::NegativeAmount(dec!(-1))
        );
    }

    #[test]
    fn test_breakdown_parts_sum_exactly() {
        let breakdown = engine()
            .breakdown(dec!(12345), Currency::Pkr, Some(dec!(0.1)))
            .unwrap();
        assert_eq!(breakdown.gross, dec!(36170.85));
        assert_eq!(
            breakdown.platform_commission + breakdown.creator_share,
            breakdown.gross
        );
        assert_eq!(
            breakdown.withdrawal_fee + breakdown.payout,
            breakdown.creator_share
        );
        assert_eq!(breakdown.fee_rate, dec!(0.1));
    }

    #[test]
    fn test_breakdown_uses_default_fee() {
        let breakdown = engine().breakdown(dec!(100), Currency::Usd, None).unwrap();
        assert_eq!(breakdown.fee_rate, dec!(0.05));
    }

    #[test]
    fn test_new_validates_rates() {
        let rates = RateTable::from_config(&ValuationConfig::default()).unwrap();
        let conversion = ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap();

        assert!(matches!(
            EarningsEngine::new(conversion.clone(), dec!(1.2), DEFAULT_WITHDRAWAL_FEE),
            Err(ValuationError::InvalidRate { .. })
        ));
        assert_eq!(
            EarningsEngine::new(conversion.clone(), DEFAULT_COMMISSION_RATE, dec!(1)).unwrap_err(),
            ValuationError::InvalidFee(dec!(1))
        );
        assert!(EarningsEngine::new(conversion, Decimal::ONE, Decimal::ZERO).is_ok());
    }
}
