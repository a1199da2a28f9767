//! Gift and recharge package catalogs: validation, ranking, and audits.

pub mod audit;
pub mod ranking;
pub mod types;


pub use audit::{DiamondDiscrepancy, audit_gift_diamonds};
pub use ranking::{Metric, RankItem, RankedEntry, Ranking, TOLERANCE_DP, ValueRanker, tolerance};
pub use types::{Gift, Rarity, RechargePackage};
