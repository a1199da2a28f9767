//! Currency and country listing routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use serde::Serialize;
use serde_json::json;

use crate::{ApiError, AppState};

/// Creates the listing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/currencies", get(list_currencies))
        .route("/countries", get(list_countries))
}

/// Response for a currency.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    /// Currency code (ISO 4217).
    pub code: &'static str,
    /// Value of one coin in this currency.
    pub coin_rate: String,
    /// Display symbol.
    pub symbol: String,
    /// Number of display decimal places.
    pub decimal_places: u32,
}

/// Response for a country.
#[derive(Debug, Serialize)]
pub struct CountryResponse {
    /// Country id (ISO 3166 alpha-2).
    pub id: String,
    /// Country name.
    pub name: String,
    /// Local currency code.
    pub currency: &'static str,
    /// Price of one coin in the local currency.
    pub coin_rate: String,
}

/// GET `/currencies` - List configured currencies.
async fn list_currencies(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let valuation = &state.valuation;
    let response = valuation
        .rates
        .currencies()
        .into_iter()
        .map(|rate| {
            let convention = valuation.formatter.convention(rate.currency)?;
            Ok(CurrencyResponse {
                code: rate.currency.code(),
                coin_rate: rate.rate.to_string(),
                symbol: convention.symbol.trim().to_string(),
                decimal_places: convention.decimal_places,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok((StatusCode::OK, Json(json!({ "currencies": response }))))
}

/// GET `/countries` - List configured countries.
async fn list_countries(State(state): State<AppState>) -> impl IntoResponse {
    let response: Vec<CountryResponse> = state
        .valuation
        .rates
        .countries()
        .map(|c| CountryResponse {
            id: c.id.clone(),
            name: c.name.clone(),
            currency: c.currency.code(),
            coin_rate: c.coin_rate.to_string(),
        })
        .collect();

    (StatusCode::OK, Json(json!({ "countries": response })))
}
