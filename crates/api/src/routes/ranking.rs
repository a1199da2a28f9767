//! Best-value ranking routes for gifts and recharge packages.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use coinvalue_core::catalog::{DiamondDiscrepancy, Gift, Ranking, RechargePackage, ValueRanker};
use serde::{Deserialize, Serialize};

use crate::extractors::json_body;
use crate::{ApiError, AppState};

/// Creates the ranking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rank/gifts", post(rank_gifts))
        .route("/rank/packages", post(rank_packages))
}

/// Request body for ranking gifts.
#[derive(Debug, Deserialize)]
pub struct RankGiftsRequest {
    /// Gifts to rank.
    pub gifts: Vec<Gift>,
}

/// Request body for ranking recharge packages.
#[derive(Debug, Deserialize)]
pub struct RankPackagesRequest {
    /// Packages to rank; all must be priced in one currency.
    pub packages: Vec<RechargePackage>,
}

/// Response for a gift ranking.
#[derive(Debug, Serialize)]
pub struct RankGiftsResponse {
    /// Id of the best-value gift, if any.
    pub best: Option<String>,
    /// Gifts ordered by diamonds per coin, highest first.
    pub ranking: Ranking,
    /// Gifts whose diamond value disagrees with the diamond ratio.
    pub discrepancies: Vec<DiamondDiscrepancy>,
}

/// Response for a package ranking.
#[derive(Debug, Serialize)]
pub struct RankPackagesResponse {
    /// Id of the best-value package, if any.
    pub best: Option<String>,
    /// Packages ordered by price per coin, cheapest first.
    pub ranking: Ranking,
}

/// POST `/rank/gifts` - Rank gifts and audit their diamond values.
async fn rank_gifts(
    State(state): State<AppState>,
    payload: Result<Json<RankGiftsRequest>, JsonRejection>,
) -> Result<Json<RankGiftsResponse>, ApiError> {
    let payload = json_body(payload)?;

    let ranking = ValueRanker::rank_gifts(&payload.gifts)?;
    let discrepancies = state.valuation.audit_gifts(&payload.gifts)?;

    Ok(Json(RankGiftsResponse {
        best: ranking.best().map(|e| e.item.id.clone()),
        ranking,
        discrepancies,
    }))
}

/// POST `/rank/packages` - Rank recharge packages by price per coin.
async fn rank_packages(
    State(state): State<AppState>,
    payload: Result<Json<RankPackagesRequest>, JsonRejection>,
) -> Result<Json<RankPackagesResponse>, ApiError> {
    let payload = json_body(payload)?;

    let ranking = state.valuation.ranker.rank_packages(&payload.packages)?;

    Ok(Json(RankPackagesResponse {
        best: ranking.best().map(|e| e.item.id.clone()),
        ranking,
    }))
}
