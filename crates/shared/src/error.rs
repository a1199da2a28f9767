//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Domain errors from the valuation engine are folded into these categories
/// before they reach a caller outside the core.
#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown currency code or country id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range request input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed request the engine cannot honour, such as formatting
    /// an unsupported currency or using an invalid rate.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Arithmetic overflow.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when the caller sent something the engine refuses, as opposed
    /// to the service failing. Client errors are logged at `warn`.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<crate::types::money::ParseCurrencyError> for AppError {
    fn from(err: crate::types::money::ParseCurrencyError) -> Self {
        Self::NotFound(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
