//! Shared types, errors, and configuration for Coinvalue.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and money with decimal precision
//! - Application-wide error types
//! - Configuration management, including the static valuation tables

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, CountryConfig, DEFAULT_COMMISSION_RATE, DEFAULT_DIAMOND_RATIO, DEFAULT_WITHDRAWAL_FEE,
    ServerConfig, ValuationConfig,
};
pub use error::{AppError, AppResult};
pub use types::{Currency, Money};
