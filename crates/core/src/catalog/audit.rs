//! Gift catalog consistency checks.
//!
//! The catalog states a diamond value per gift, and the engine derives one
//! from the coin cost and the configured diamond ratio. When they disagree
//! the discrepancy is reported back to the catalog owner. Neither value is
//! rewritten.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::types::Gift;
use crate::currency::ConversionEngine;
use crate::error::ValuationResult;

/// A gift whose catalog diamond value differs from its converted coin cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiamondDiscrepancy {
    /// Gift identifier.
    pub gift_id: String,
    /// Coin cost from the catalog.
    pub coin_cost: u64,
    /// Diamond value from the catalog.
    pub catalog_diamonds: u64,
    /// Diamonds obtained by converting the coin cost.
    pub converted_diamonds: Decimal,
}

/// Lists every gift whose diamond value disagrees with the diamond ratio.
pub fn audit_gift_diamonds(
    conversion: &ConversionEngine,
    gifts: &[Gift],
) -> ValuationResult<Vec<DiamondDiscrepancy>> {
    let mut discrepancies = Vec::new();
    for gift in gifts {
        let converted = conversion.coin_to_diamond(Decimal::from(gift.coin_cost))?;
        if converted != Decimal::from(gift.diamond_value) {
            warn!(
                gift_id = %gift.id,
                coin_cost = gift.coin_cost,
                catalog_diamonds = gift.diamond_value,
                converted_diamonds = %converted,
                "Gift diamond value disagrees with diamond ratio"
            );
            discrepancies.push(DiamondDiscrepancy {
                gift_id: gift.id.clone(),
                coin_cost: gift.coin_cost,
                catalog_diamonds: gift.diamond_value,
                converted_diamonds: converted,
            });
        }
    }
    Ok(discrepancies)
}
