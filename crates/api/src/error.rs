//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use coinvalue_core::ValuationError;
use coinvalue_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by handlers; renders as `{ "error", "message" }` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValuationError> for ApiError {
    fn from(err: ValuationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_client_error() {
            warn!(code = self.0.error_code(), error = %self.0, "Request rejected");
        } else {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code().to_lowercase(),
                "message": self.0.to_string()
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinvalue_shared::Currency;

    #[test]
    fn test_status_follows_app_error() {
        let response = ApiError(AppError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError::from(ValuationError::UnsupportedCurrencyFormat(Currency::Usd)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::from(ValuationError::Overflow).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
