//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod conversion;
pub mod currencies;
pub mod earnings;
pub mod health;
pub mod ranking;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(currencies::routes())
        .merge(conversion::routes())
        .merge(earnings::routes())
        .merge(ranking::routes())
}
