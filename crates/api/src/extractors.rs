//! Request field parsing.
//!
//! Numbers arrive as strings. Anything that does not parse is a validation
//! error; nothing is coerced to zero.

use std::str::FromStr;

use axum::{Json, extract::rejection::JsonRejection};
use coinvalue_shared::{AppError, Currency};
use rust_decimal::Decimal;

use crate::ApiError;

/// Unwraps a JSON body, turning any rejection into a validation error.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError(AppError::Validation(rejection.body_text())))
}

/// Parses a decimal request field.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        ApiError(AppError::Validation(format!(
            "{field} must be a decimal number, got '{raw}'"
        )))
    })
}

/// Parses an optional decimal request field.
pub fn parse_optional_decimal(field: &str, raw: Option<&str>) -> Result<Option<Decimal>, ApiError> {
    raw.map(|value| parse_decimal(field, value)).transpose()
}

/// Parses a currency code request field.
pub fn parse_currency(raw: &str) -> Result<Currency, ApiError> {
    Currency::from_str(raw).map_err(|e| ApiError(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("1000", dec!(1000))]
    #[case(" 10.5 ", dec!(10.5))]
    #[case("-5", dec!(-5))]
    #[case("0.0001", dec!(0.0001))]
    fn test_parse_decimal(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_decimal("coins", raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("1,000")]
    #[case("12e")]
    fn test_parse_decimal_rejects_malformed(#[case] raw: &str) {
        let err = parse_decimal("coins", raw).unwrap_err();
        assert!(matches!(err.0, AppError::Validation(_)));
    }

    #[test]
    fn test_parse_optional_decimal() {
        assert_eq!(parse_optional_decimal("fee", None).unwrap(), None);
        assert_eq!(
            parse_optional_decimal("fee", Some("0.1")).unwrap(),
            Some(dec!(0.1))
        );
        assert!(parse_optional_decimal("fee", Some("ten")).is_err());
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("usd").unwrap(), Currency::Usd);
        let err = parse_currency("XXX").unwrap_err();
        assert!(matches!(err.0, AppError::NotFound(_)));
    }
}
