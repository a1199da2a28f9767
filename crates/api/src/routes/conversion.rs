//! Coin, currency, and diamond conversion routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use coinvalue_shared::AppError;
use serde::{Deserialize, Serialize};

use crate::extractors::{json_body, parse_currency, parse_decimal, parse_optional_decimal};
use crate::{ApiError, AppState};

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/convert/coins", post(convert_coins))
        .route("/convert/currency", post(convert_currency))
        .route("/convert/diamonds", post(convert_diamonds))
        .route("/convert/local", post(convert_local))
}

/// Request body for converting coins to a currency.
#[derive(Debug, Deserialize)]
pub struct CoinsRequest {
    /// Coin amount, as a decimal string.
    pub coins: String,
    /// Target currency code.
    pub currency: String,
}

/// Request body for converting a currency amount to coins.
#[derive(Debug, Deserialize)]
pub struct CurrencyRequest {
    /// Currency amount, as a decimal string.
    pub amount: String,
    /// Source currency code.
    pub currency: String,
}

/// Request body for coin/diamond conversion. Exactly one field must be set.
#[derive(Debug, Deserialize)]
pub struct DiamondsRequest {
    /// Coins to convert to diamonds.
    pub coins: Option<String>,
    /// Diamonds to convert to coins.
    pub diamonds: Option<String>,
}

/// Request body for converting coins to a country's local price.
#[derive(Debug, Deserialize)]
pub struct LocalRequest {
    /// Coin amount, as a decimal string.
    pub coins: String,
    /// Country id (ISO 3166 alpha-2, any case).
    pub country: String,
}

/// A converted money amount.
#[derive(Debug, Serialize)]
pub struct MoneyResponse {
    /// Coins converted.
    pub coins: String,
    /// Currency code.
    pub currency: &'static str,
    /// Exact amount, unrounded.
    pub amount: String,
    /// Display string, rounded to the currency's decimal places.
    pub formatted: String,
}

/// Response for a currency to coin conversion.
#[derive(Debug, Serialize)]
pub struct CoinsResponse {
    /// Currency amount converted.
    pub amount: String,
    /// Currency code.
    pub currency: &'static str,
    /// Equivalent coins.
    pub coins: String,
}

/// Response for a coin/diamond conversion.
#[derive(Debug, Serialize)]
pub struct DiamondsResponse {
    /// Coin side of the conversion.
    pub coins: String,
    /// Diamond side of the conversion.
    pub diamonds: String,
}

/// Response for a local price conversion.
#[derive(Debug, Serialize)]
pub struct LocalResponse {
    /// Normalised country id.
    pub country: String,
    /// Country name.
    pub country_name: String,
    /// Converted amount.
    #[serde(flatten)]
    pub money: MoneyResponse,
}

/// POST `/convert/coins` - Value coins in a currency.
async fn convert_coins(
    State(state): State<AppState>,
    payload: Result<Json<CoinsRequest>, JsonRejection>,
) -> Result<Json<MoneyResponse>, ApiError> {
    let payload = json_body(payload)?;
    let coins = parse_decimal("coins", &payload.coins)?;
    let currency = parse_currency(&payload.currency)?;

    let valuation = &state.valuation;
    let money = valuation.conversion.coin_to_currency(coins, currency)?;
    let formatted = valuation.formatter.format_money(&money)?;

    Ok(Json(MoneyResponse {
        coins: coins.to_string(),
        currency: currency.code(),
        amount: money.amount.to_string(),
        formatted,
    }))
}

/// POST `/convert/currency` - Convert a currency amount to coins.
async fn convert_currency(
    State(state): State<AppState>,
    payload: Result<Json<CurrencyRequest>, JsonRejection>,
) -> Result<Json<CoinsResponse>, ApiError> {
    let payload = json_body(payload)?;
    let amount = parse_decimal("amount", &payload.amount)?;
    let currency = parse_currency(&payload.currency)?;

    let coins = state.valuation.conversion.currency_to_coin(amount, currency)?;

    Ok(Json(CoinsResponse {
        amount: amount.to_string(),
        currency: currency.code(),
        coins: coins.to_string(),
    }))
}

/// POST `/convert/diamonds` - Convert coins to diamonds or diamonds to coins.
async fn convert_diamonds(
    State(state): State<AppState>,
    payload: Result<Json<DiamondsRequest>, JsonRejection>,
) -> Result<Json<DiamondsResponse>, ApiError> {
    let payload = json_body(payload)?;
    let coins = parse_optional_decimal("coins", payload.coins.as_deref())?;
    let diamonds = parse_optional_decimal("diamonds", payload.diamonds.as_deref())?;
    let conversion = &state.valuation.conversion;

    let (coins, diamonds) = match (coins, diamonds) {
        (Some(coins), None) => (coins, conversion.coin_to_diamond(coins)?),
        (None, Some(diamonds)) => (conversion.diamond_to_coin(diamonds)?, diamonds),
        _ => {
            return Err(AppError::Validation(
                "exactly one of coins or diamonds must be provided".to_string(),
            )
            .into());
        }
    };

    Ok(Json(DiamondsResponse {
        coins: coins.to_string(),
        diamonds: diamonds.to_string(),
    }))
}

/// POST `/convert/local` - Price coins in a country's local currency.
async fn convert_local(
    State(state): State<AppState>,
    payload: Result<Json<LocalRequest>, JsonRejection>,
) -> Result<Json<LocalResponse>, ApiError> {
    let payload = json_body(payload)?;
    let coins = parse_decimal("coins", &payload.coins)?;

    let valuation = &state.valuation;
    let country = valuation.rates.country(&payload.country)?;
    let money = valuation.conversion.coin_to_local(coins, &country.id)?;
    let formatted = valuation.formatter.format_money(&money)?;

    Ok(Json(LocalResponse {
        country: country.id.clone(),
        country_name: country.name.clone(),
        money: MoneyResponse {
            coins: coins.to_string(),
            currency: money.currency.code(),
            amount: money.amount.to_string(),
            formatted,
        },
    }))
}
