//! Creator earnings routes.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use coinvalue_core::currency::EarningsBreakdown;
use serde::{Deserialize, Serialize};

use crate::extractors::{json_body, parse_currency, parse_decimal, parse_optional_decimal};
use crate::{ApiError, AppState};

/// Creates the earnings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/earnings", post(earnings))
}

/// Request body for an earnings breakdown.
#[derive(Debug, Deserialize)]
pub struct EarningsRequest {
    /// Coins received, as a decimal string.
    pub coins: String,
    /// Payout currency code.
    pub currency: String,
    /// Withdrawal fee rate in `[0, 1)`; the configured default when absent.
    pub fee: Option<String>,
}

/// Earnings breakdown with display strings.
#[derive(Debug, Serialize)]
pub struct EarningsResponse {
    /// Exact amounts.
    #[serde(flatten)]
    pub breakdown: EarningsBreakdown,
    /// Commission rate applied.
    pub commission_rate: String,
    /// Rounded display strings.
    pub formatted: FormattedEarnings,
}

/// Display strings for the monetary parts of a breakdown.
#[derive(Debug, Serialize)]
pub struct FormattedEarnings {
    /// Full value of the coins.
    pub gross: String,
    /// Platform commission.
    pub platform_commission: String,
    /// Creator share before the fee.
    pub creator_share: String,
    /// Withdrawal fee.
    pub withdrawal_fee: String,
    /// Net payout.
    pub payout: String,
}

/// POST `/earnings` - Split coins into commission, fee, and payout.
async fn earnings(
    State(state): State<AppState>,
    payload: Result<Json<EarningsRequest>, JsonRejection>,
) -> Result<Json<EarningsResponse>, ApiError> {
    let payload = json_body(payload)?;
    let coins = parse_decimal("coins", &payload.coins)?;
    let currency = parse_currency(&payload.currency)?;
    let fee = parse_optional_decimal("fee", payload.fee.as_deref())?;

    let valuation = &state.valuation;
    let breakdown = valuation.earnings.breakdown(coins, currency, fee)?;

    let fmt = |amount| valuation.formatter.format(amount, currency);
    let formatted = FormattedEarnings {
        gross: fmt(breakdown.gross)?,
        platform_commission: fmt(breakdown.platform_commission)?,
        creator_share: fmt(breakdown.creator_share)?,
        withdrawal_fee: fmt(breakdown.withdrawal_fee)?,
        payout: fmt(breakdown.payout)?,
    };

    Ok(Json(EarningsResponse {
        breakdown,
        commission_rate: valuation.earnings.commission_rate().to_string(),
        formatted,
    }))
}
