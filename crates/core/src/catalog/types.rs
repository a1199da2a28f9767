//! Catalog record types supplied by the catalog collaborator.

use coinvalue_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::RateTable;
use crate::error::{ValuationError, ValuationResult};

/// Gift rarity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Everyday gifts.
    Common,
    /// Less common gifts.
    Rare,
    /// Premium gifts.
    Epic,
    /// Top-tier gifts.
    Legendary,
}

/// A gift a viewer can send for coins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    /// Catalog identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in coins.
    pub coin_cost: u64,
    /// Diamonds credited to the receiver, as stated by the catalog.
    pub diamond_value: u64,
    /// Catalog category.
    pub category: String,
    /// Rarity tag.
    pub rarity: Rarity,
}

impl Gift {
    /// Checks that cost and value are positive.
    pub fn validate(&self) -> ValuationResult<()> {
        if self.coin_cost == 0 {
            return Err(invalid(&self.id, "coin cost must be positive"));
        }
        if self.diamond_value == 0 {
            return Err(invalid(&self.id, "diamond value must be positive"));
        }
        Ok(())
    }
}

/// A coin package sold in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargePackage {
    /// Catalog identifier.
    pub id: String,
    /// Country the package is sold in.
    pub country_id: String,
    /// Coins granted.
    pub coins: u64,
    /// Price in `currency`.
    pub price: Decimal,
    /// Price currency.
    pub currency: Currency,
}

impl RechargePackage {
    /// Checks quantities and that the country resolves to this currency.
    pub fn validate(&self, rates: &RateTable) -> ValuationResult<()> {
        if self.coins == 0 {
            return Err(invalid(&self.id, "coins must be positive"));
        }
        if self.price <= Decimal::ZERO {
            return Err(invalid(&self.id, "price must be positive"));
        }
        let (expected, _) = rates.coin_rate_for(&self.country_id)?;
        if expected != self.currency {
            return Err(ValuationError::CurrencyMismatch {
                expected,
                got: self.currency,
            });
        }
        Ok(())
    }
}

fn invalid(id: &str, reason: &str) -> ValuationError {
    ValuationError::InvalidCatalogEntry {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}
