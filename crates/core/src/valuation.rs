//! The assembled valuation engine.
//!
//! Everything is built once from `ValuationConfig` and then only read.
//! Wrap it in an `Arc` to share it between request handlers or threads.

use std::sync::Arc;

use coinvalue_shared::ValuationConfig;
use tracing::info;

use crate::catalog::{DiamondDiscrepancy, Gift, ValueRanker, audit_gift_diamonds};
use crate::currency::{ConversionEngine, EarningsEngine, Formatter, RateTable};
use crate::error::ValuationResult;

/// Rate table plus every engine built on it.
#[derive(Debug, Clone)]
pub struct Valuation {
    /// Coin exchange rates and country coin prices.
    pub rates: Arc<RateTable>,
    /// Coin to currency and diamond conversions.
    pub conversion: ConversionEngine,
    /// Creator commission and withdrawal fees.
    pub earnings: EarningsEngine,
    /// Best-value ranking.
    pub ranker: ValueRanker,
    /// Display formatting.
    pub formatter: Formatter,
}

impl Valuation {
    /// Validates the configuration and builds every component.
    pub fn from_config(config: &ValuationConfig) -> ValuationResult<Self> {
        let rates = Arc::new(RateTable::from_config(config)?);
        let conversion = ConversionEngine::new(Arc::clone(&rates), config.diamond_ratio)?;
        let earnings = EarningsEngine::new(
            conversion.clone(),
            config.commission_rate,
            config.withdrawal_fee,
        )?;
        let ranker = ValueRanker::new(Arc::clone(&rates));
        let formatter = Formatter::from_config(config)?;

        info!(
            commission_rate = %config.commission_rate,
            diamond_ratio = %config.diamond_ratio,
            withdrawal_fee = %config.withdrawal_fee,
            "Valuation engine ready"
        );

        Ok(Self {
            rates,
            conversion,
            earnings,
            ranker,
            formatter,
        })
    }

    /// Reports gifts whose diamond value disagrees with the diamond ratio.
    pub fn audit_gifts(&self, gifts: &[Gift]) -> ValuationResult<Vec<DiamondDiscrepancy>> {
        audit_gift_diamonds(&self.conversion, gifts)
    }
}
