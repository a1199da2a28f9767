//! Property-based tests for coin conversion and earnings.

use std::sync::Arc;

use coinvalue_shared::{Currency, ValuationConfig};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::conversion::ConversionEngine;
use super::earnings::{DEFAULT_COMMISSION_RATE, DEFAULT_WITHDRAWAL_FEE, EarningsEngine};
use super::format::Formatter;
use super::rates::RateTable;

fn engines() -> (ConversionEngine, EarningsEngine) {
    let rates = RateTable::from_config(&ValuationConfig::default()).unwrap();
    let conversion = ConversionEngine::new(Arc::new(rates), dec!(0.5)).unwrap();
    let earnings = EarningsEngine::new(
        conversion.clone(),
        DEFAULT_COMMISSION_RATE,
        DEFAULT_WITHDRAWAL_FEE,
    )
    .unwrap();
    (conversion, earnings)
}

/// Strategy for any supported currency.
fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy for whole coin amounts (0 to 10 billion).
fn coin_count() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64).prop_map(Decimal::from)
}

/// Strategy for fractional coin amounts with two decimals.
fn coin_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Zero coins are worth zero in every currency.
    #[test]
    fn prop_zero_coins_are_worth_nothing(currency in any_currency()) {
        let (conversion, _) = engines();
        let money = conversion.coin_to_currency(Decimal::ZERO, currency).unwrap();
        prop_assert_eq!(money.amount, Decimal::ZERO);
    }

    /// More coins are never worth less.
    #[test]
    fn prop_coin_value_is_monotonic(
        a in coin_amount(),
        b in coin_amount(),
        currency in any_currency(),
    ) {
        let (conversion, _) = engines();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_value = conversion.coin_to_currency(low, currency).unwrap();
        let high_value = conversion.coin_to_currency(high, currency).unwrap();
        prop_assert!(low_value.amount <= high_value.amount);
    }

    /// Coins through diamonds and back never exceed the original.
    #[test]
    fn prop_diamond_round_trip_never_gains(coins in coin_amount()) {
        let (conversion, _) = engines();
        let diamonds = conversion.coin_to_diamond(coins).unwrap();
        let back = conversion.diamond_to_coin(diamonds).unwrap();
        prop_assert!(back <= coins, "{} coins came back as {}", coins, back);
        prop_assert_eq!(diamonds, diamonds.floor());
    }

    /// Whole even coin counts survive the diamond round trip exactly.
    #[test]
    fn prop_even_coins_round_trip_exactly(half in 0i64..1_000_000_000i64) {
        let (conversion, _) = engines();
        let coins = Decimal::from(half * 2);
        let diamonds = conversion.coin_to_diamond(coins).unwrap();
        prop_assert_eq!(conversion.diamond_to_coin(diamonds).unwrap(), coins);
    }

    /// Creator earnings are exactly half the coin value.
    #[test]
    fn prop_creator_earnings_is_half(coins in coin_count(), currency in any_currency()) {
        let (conversion, earnings) = engines();
        let value = conversion.coin_to_currency(coins, currency).unwrap();
        let share = earnings.creator_earnings(coins, currency).unwrap();
        prop_assert_eq!(share.amount, dec!(0.5) * value.amount);
    }

    /// The default withdrawal keeps exactly 95% of earnings.
    #[test]
    fn prop_withdrawal_keeps_95_percent(coins in coin_count(), currency in any_currency()) {
        let (_, earnings) = engines();
        let share = earnings.creator_earnings(coins, currency).unwrap();
        let payout = earnings.withdrawal_amount(coins, currency, dec!(0.05)).unwrap();
        prop_assert_eq!(payout.amount, dec!(0.95) * share.amount);
    }

    /// Breakdown parts always add back up.
    #[test]
    fn prop_breakdown_is_balanced(
        coins in coin_amount(),
        fee_bps in 0i64..10_000,
        currency in any_currency(),
    ) {
        let (_, earnings) = engines();
        let fee = Decimal::new(fee_bps, 4);
        let b = earnings.breakdown(coins, currency, Some(fee)).unwrap();
        prop_assert_eq!(b.platform_commission + b.creator_share, b.gross);
        prop_assert_eq!(b.withdrawal_fee + b.payout, b.creator_share);
        prop_assert!(b.payout <= b.creator_share);
    }

    /// Negative coin amounts are always rejected.
    #[test]
    fn prop_negative_coins_rejected(cents in 1i64..1_000_000_000, currency in any_currency()) {
        let (conversion, _) = engines();
        prop_assert!(conversion.coin_to_currency(Decimal::new(-cents, 2), currency).is_err());
    }

    /// Formatting is deterministic and always carries the symbol.
    #[test]
    fn prop_format_is_deterministic(cents in -1_000_000_000i64..1_000_000_000, currency in any_currency()) {
        let formatter = Formatter::new();
        let amount = Decimal::new(cents, 2);
        let first = formatter.format(amount, currency).unwrap();
        let second = formatter.format(amount, currency).unwrap();
        prop_assert_eq!(&first, &second);

        let symbol = formatter.convention(currency).unwrap().symbol.clone();
        prop_assert!(first.contains(symbol.trim()));
    }
}
