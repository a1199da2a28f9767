//! Liveness route that also reports the loaded valuation settings.

use axum::{Json, Router, extract::State, routing::get};
use coinvalue_core::Valuation;
use serde::Serialize;

use crate::AppState;

/// Creates the health route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Service liveness plus a summary of the active configuration.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// Always `"healthy"` while the router answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Settings the engines were built with.
    pub valuation: ValuationSummary,
}

/// Counts and constants of the loaded [`Valuation`].
#[derive(Debug, Serialize)]
pub struct ValuationSummary {
    /// Currencies with a coin rate.
    pub currencies: usize,
    /// Countries with a local price.
    pub countries: usize,
    /// Diamonds credited per coin.
    pub diamond_ratio: String,
    /// Platform share of gift value.
    pub commission_rate: String,
    /// Default withdrawal fee rate.
    pub withdrawal_fee: String,
}

impl From<&Valuation> for ValuationSummary {
    fn from(valuation: &Valuation) -> Self {
        Self {
            currencies: valuation.rates.currencies().len(),
            countries: valuation.rates.countries().count(),
            diamond_ratio: valuation.conversion.diamond_ratio().to_string(),
            commission_rate: valuation.earnings.commission_rate().to_string(),
            withdrawal_fee: valuation.earnings.default_fee().to_string(),
        }
    }
}

/// GET `/health`
async fn health(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        valuation: ValuationSummary::from(&*state.valuation),
    })
}
