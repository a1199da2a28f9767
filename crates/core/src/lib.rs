//! Coin valuation engine for Coinvalue.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every operation is synchronous and deterministic; the only shared state is
//! the rate table, which is immutable once built.
//!
//! # Modules
//!
//! - `currency` - Rate table, coin/currency/diamond conversion, earnings, formatting
//! - `catalog` - Gift and package records, best-value ranking, catalog audits
//! - `valuation` - All of the above assembled from configuration
//! - `error` - Valuation error type

pub mod catalog;
pub mod currency;
pub mod error;
pub mod valuation;

pub use error::{ValuationError, ValuationResult};
pub use valuation::Valuation;
