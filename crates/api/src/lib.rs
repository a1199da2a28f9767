//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes that forward valuation computations unchanged
//! - Request parsing that rejects malformed numbers at the boundary
//! - Error responses mapped from domain errors

pub mod error;
pub mod extractors;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use coinvalue_core::Valuation;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Valuation engine, built once at startup.
    pub valuation: Arc<Valuation>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
