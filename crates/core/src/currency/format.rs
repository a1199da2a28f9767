//! Display formatting for currency amounts.
//!
//! Each currency has a display convention: symbol and placement, digit
//! grouping, and the number of decimal places. Amounts are rounded to those
//! places with banker's rounding (round half to even).

use std::collections::HashMap;
use std::str::FromStr;

use coinvalue_shared::{Currency, Money, ValuationConfig};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{ValuationError, ValuationResult};

/// Largest number of decimal places a convention may request.
pub const MAX_DECIMAL_PLACES: u32 = 8;

/// Where the symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPlacement {
    /// `$1.00`
    Prefix,
    /// `1.00 AED`
    Suffix,
}

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Groups of three: `1,000,000`.
    Thousands,
    /// Last three, then groups of two: `10,00,000`.
    Indian,
}

/// How one currency is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayConvention {
    /// Symbol text, including any separating space.
    pub symbol: String,
    /// Symbol placement.
    pub placement: SymbolPlacement,
    /// Digits after the decimal separator.
    pub decimal_places: u32,
    /// Integer digit grouping.
    pub grouping: Grouping,
    /// Group separator.
    pub group_separator: char,
    /// Decimal separator.
    pub decimal_separator: char,
}

impl DisplayConvention {
    /// Prefix symbol, thousands grouping, `,` and `.` separators.
    pub fn prefixed(symbol: &str, decimal_places: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            placement: SymbolPlacement::Prefix,
            decimal_places,
            grouping: Grouping::Thousands,
            group_separator: ',',
            decimal_separator: '.',
        }
    }

    /// Built-in convention for a currency.
    pub fn default_for(currency: Currency) -> Self {
        let places = currency.minor_units();
        match currency {
            Currency::Usd => Self::prefixed("$", places),
            Currency::Eur => Self::prefixed("€", places),
            Currency::Gbp => Self::prefixed("£", places),
            Currency::Cad => Self::prefixed("CA$", places),
            Currency::Aud => Self::prefixed("A$", places),
            Currency::Inr => Self {
                grouping: Grouping::Indian,
                ..Self::prefixed("₹", places)
            },
            Currency::Pkr => Self::prefixed("Rs ", places),
            Currency::Bdt => Self::prefixed("৳", places),
            Currency::Aed => Self {
                placement: SymbolPlacement::Suffix,
                ..Self::prefixed(" AED", places)
            },
            Currency::Sar => Self {
                placement: SymbolPlacement::Suffix,
                ..Self::prefixed(" SAR", places)
            },
            Currency::Idr => Self::prefixed("Rp ", places),
            Currency::Jpy => Self::prefixed("¥", places),
            Currency::Krw => Self::prefixed("₩", places),
        }
    }
}

/// Renders amounts using per-currency display conventions.
#[derive(Debug, Clone)]
pub struct Formatter {
    conventions: HashMap<Currency, DisplayConvention>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    /// Formatter with the built-in convention for every supported currency.
    pub fn new() -> Self {
        Self {
            conventions: Currency::ALL
                .into_iter()
                .map(|c| (c, DisplayConvention::default_for(c)))
                .collect(),
        }
    }

    /// Formatter with no conventions at all.
    pub fn empty() -> Self {
        Self {
            conventions: HashMap::new(),
        }
    }

    /// Built-in conventions with the configured decimal-place overrides.
    pub fn from_config(config: &ValuationConfig) -> ValuationResult<Self> {
        config
            .decimal_places
            .iter()
            .try_fold(Self::new(), |formatter, (code, places)| {
                formatter.with_decimal_places(Currency::from_str(code)?, *places)
            })
    }

    /// Adds or replaces the convention for a currency.
    #[must_use]
    pub fn with_convention(mut self, currency: Currency, convention: DisplayConvention) -> Self {
        self.conventions.insert(currency, convention);
        self
    }

    /// Overrides the number of decimal places for a currency.
    pub fn with_decimal_places(mut self, currency: Currency, places: u32) -> ValuationResult<Self> {
        if places > MAX_DECIMAL_PLACES {
            return Err(ValuationError::InvalidConfig(format!(
                "{currency} decimal places {places} exceeds {MAX_DECIMAL_PLACES}"
            )));
        }
        let convention = self
            .conventions
            .get_mut(&currency)
            .ok_or(ValuationError::UnsupportedCurrencyFormat(currency))?;
        convention.decimal_places = places;
        Ok(self)
    }

    /// Returns the display convention for a currency.
    pub fn convention(&self, currency: Currency) -> ValuationResult<&DisplayConvention> {
        self.conventions
            .get(&currency)
            .ok_or(ValuationError::UnsupportedCurrencyFormat(currency))
    }

    /// Formats `amount` as a display string in `currency`.
    pub fn format(&self, amount: Decimal, currency: Currency) -> ValuationResult<String> {
        let convention = self.convention(currency)?;
        let rounded = amount.round_dp_with_strategy(
            convention.decimal_places,
            RoundingStrategy::MidpointNearestEven,
        );
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };

        let digits = format!("{:.*}", convention.decimal_places as usize, rounded.abs());
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut number = group_digits(integer, convention.grouping, convention.group_separator);
        if let Some(fraction) = fraction {
            number.push(convention.decimal_separator);
            number.push_str(fraction);
        }

        Ok(match convention.placement {
            SymbolPlacement::Prefix => format!("{sign}{}{number}", convention.symbol),
            SymbolPlacement::Suffix => format!("{sign}{number}{}", convention.symbol),
        })
    }

    /// Formats a [`Money`] value.
    pub fn format_money(&self, money: &Money) -> ValuationResult<String> {
        self.format(money.amount, money.currency)
    }
}

fn group_digits(integer: &str, grouping: Grouping, separator: char) -> String {
    let digits: Vec<char> = integer.chars().collect();
    if digits.len() <= 3 {
        return integer.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = match grouping {
        Grouping::Thousands => 3,
        Grouping::Indian => 2,
    };

    let mut groups: Vec<String> = head
        .rchunks(group)
        .map(|chunk| chunk.iter().collect())
        .collect();
    groups.reverse();
    groups.push(tail.iter().collect());
    groups.join(&separator.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(1000), Currency::Usd, "$1,000.00")]
    #[case(dec!(0), Currency::Usd, "$0.00")]
    #[case(dec!(999.999), Currency::Usd, "$1,000.00")]
    #[case(dec!(1234567.891), Currency::Eur, "€1,234,567.89")]
    #[case(dec!(10.125), Currency::Gbp, "£10.12")]
    #[case(dec!(10.135), Currency::Gbp, "£10.14")]
    #[case(dec!(-5.5), Currency::Usd, "-$5.50")]
    #[case(dec!(1500.4), Currency::Jpy, "¥1,500")]
    #[case(dec!(2500.5), Currency::Krw, "₩2,500")]
    #[case(dec!(10000000), Currency::Inr, "₹1,00,00,000.00")]
    #[case(dec!(123456.7), Currency::Inr, "₹1,23,456.70")]
    #[case(dec!(999), Currency::Inr, "₹999.00")]
    #[case(dec!(2930), Currency::Pkr, "Rs 2,930.00")]
    #[case(dec!(38.6), Currency::Aed, "38.60 AED")]
    #[case(dec!(-1234), Currency::Sar, "-1,234.00 SAR")]
    fn test_format(#[case] amount: Decimal, #[case] currency: Currency, #[case] expected: &str) {
        assert_eq!(Formatter::new().format(amount, currency).unwrap(), expected);
    }

    #[test]
    fn test_tiny_negative_rounds_to_unsigned_zero() {
        assert_eq!(
            Formatter::new().format(dec!(-0.001), Currency::Usd).unwrap(),
            "$0.00"
        );
    }

    #[test]
    fn test_decimal_places_override() {
        let formatter = Formatter::new()
            .with_decimal_places(Currency::Jpy, 2)
            .unwrap()
            .with_decimal_places(Currency::Usd, 4)
            .unwrap();
        assert_eq!(formatter.format(dec!(1500), Currency::Jpy).unwrap(), "¥1,500.00");
        assert_eq!(formatter.format(dec!(0.0105), Currency::Usd).unwrap(), "$0.0105");
    }

    #[test]
    fn test_decimal_places_override_is_bounded() {
        assert!(matches!(
            Formatter::new().with_decimal_places(Currency::Usd, 9),
            Err(ValuationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unsupported_currency_format() {
        let formatter = Formatter::empty();
        assert_eq!(
            formatter.format(dec!(1), Currency::Usd).unwrap_err(),
            ValuationError::UnsupportedCurrencyFormat(Currency::Usd)
        );
        assert_eq!(
            Formatter::empty()
                .with_decimal_places(Currency::Usd, 2)
                .unwrap_err(),
            ValuationError::UnsupportedCurrencyFormat(Currency::Usd)
        );
    }

    #[test]
    fn test_custom_convention() {
        let formatter = Formatter::empty().with_convention(
            Currency::Eur,
            DisplayConvention {
                symbol: " €".into(),
                placement: SymbolPlacement::Suffix,
                decimal_places: 2,
                grouping: Grouping::Thousands,
                group_separator: '.',
                decimal_separator: ',',
            },
        );
        assert_eq!(
            formatter.format(dec!(1234567.5), Currency::Eur).unwrap(),
            "1.234.567,50 €"
        );
    }

    #[test]
    fn test_from_config_applies_overrides() {
        let mut config = ValuationConfig::default();
        config.decimal_places.insert("krw".into(), 1);
        let formatter = Formatter::from_config(&config).unwrap();
        assert_eq!(formatter.convention(Currency::Krw).unwrap().decimal_places, 1);
        assert_eq!(formatter.convention(Currency::Usd).unwrap().decimal_places, 2);

        config.decimal_places.insert("ZZZ".into(), 1);
        assert!(matches!(
            Formatter::from_config(&config),
            Err(ValuationError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_format_money() {
        let money = Money::new(dec!(4.9875), Currency::Usd);
        assert_eq!(Formatter::new().format_money(&money).unwrap(), "$4.99");
    }
}
