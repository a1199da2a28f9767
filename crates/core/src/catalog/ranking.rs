//! Best-value ranking for gifts and recharge packages.
//!
//! Two metrics with opposite directions:
//! - `Efficiency` = value / cost, higher is better (gifts: diamonds per coin)
//! - `CostPerUnit` = cost / value, lower is better (packages: price per coin)
//!
//! Entries are sorted by the exact metric, then by ascending id. Every
//! entry within `tolerance()` of the leading metric ties for best value;
//! that leading group is ordered by ascending id, so the smallest id in it
//! wins. Exactly one entry, the first, is flagged as best value.

use std::cmp::Ordering;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Gift, RechargePackage};
use crate::currency::RateTable;
use crate::error::{ValuationError, ValuationResult};

/// Metrics closer than `10^-TOLERANCE_DP` to the leading metric tie with it.
pub const TOLERANCE_DP: u32 = 10;

/// Largest metric distance that still counts as a tie (`10^-TOLERANCE_DP`).
pub fn tolerance() -> Decimal {
    Decimal::new(1, TOLERANCE_DP)
}

/// A rankable item: what it costs and what it gives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankItem {
    /// Identifier, also the tie-break key.
    pub id: String,
    /// What the buyer pays (coins for gifts, price for packages).
    pub cost: Decimal,
    /// What the buyer receives (diamonds for gifts, coins for packages).
    pub value: Decimal,
}

impl From<&Gift> for RankItem {
    fn from(gift: &Gift) -> Self {
        Self {
            id: gift.id.clone(),
            cost: Decimal::from(gift.coin_cost),
            value: Decimal::from(gift.diamond_value),
        }
    }
}

impl From<&RechargePackage> for RankItem {
    fn from(package: &RechargePackage) -> Self {
        Self {
            id: package.id.clone(),
            cost: package.price,
            value: Decimal::from(package.coins),
        }
    }
}

/// Comparison metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// value / cost, higher is better.
    Efficiency,
    /// cost / value, lower is better.
    CostPerUnit,
}

impl Metric {
    /// Whether larger metric values rank first.
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::Efficiency)
    }

    /// Computes the metric for an item. Cost and value must be positive.
    pub fn compute(self, item: &RankItem) -> ValuationResult<Decimal> {
        if item.cost <= Decimal::ZERO || item.value <= Decimal::ZERO {
            return Err(ValuationError::InvalidCatalogEntry {
                id: item.id.clone(),
                reason: "cost and value must be positive".to_string(),
            });
        }
        let (numerator, denominator) = match self {
            Self::Efficiency => (item.value, item.cost),
            Self::CostPerUnit => (item.cost, item.value),
        };
        numerator
            .checked_div(denominator)
            .ok_or(ValuationError::Overflow)
    }

    fn order(self, a: Decimal, b: Decimal) -> Ordering {
        if self.higher_is_better() {
            b.cmp(&a)
        } else {
            a.cmp(&b)
        }
    }

    /// How much worse `metric` is than `best`, in percent.
    ///
    /// Entries that tie with the best within tolerance report 0.
    fn premium_percent(self, metric: Decimal, best: Decimal) -> ValuationResult<Decimal> {
        let gap = if self.higher_is_better() {
            best - metric
        } else {
            metric - best
        };
        let percent = gap
            .checked_div(best)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(ValuationError::Overflow)?;
        Ok(percent.round_dp(2).max(Decimal::ZERO))
    }
}

/// One ranked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// The item.
    pub item: RankItem,
    /// Metric value, unrounded.
    pub metric: Decimal,
    /// 1-based position.
    pub rank: usize,
    /// Set on exactly one entry of a non-empty ranking.
    pub best_value: bool,
    /// Percent worse than the best entry (0 for the best).
    pub premium_percent: Decimal,
}

/// Ordered ranking result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranking {
    /// Metric the entries are ordered by.
    pub metric: Metric,
    /// Entries, best first.
    pub entries: Vec<RankedEntry>,
}

impl Ranking {
    /// The best-value entry, if any.
    pub fn best(&self) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.best_value)
    }

    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ranks catalog items by value.
#[derive(Debug, Clone)]
pub struct ValueRanker {
    rates: Arc<RateTable>,
}

impl ValueRanker {
    /// Creates a ranker; the rate table resolves package countries.
    pub fn new(rates: Arc<RateTable>) -> Self {
        Self { rates }
    }

    /// Ranks arbitrary items by `metric`.
    pub fn rank(items: Vec<RankItem>, metric: Metric) -> ValuationResult<Ranking> {
        let mut scored = items
            .into_iter()
            .map(|item| metric.compute(&item).map(|m| (item, m)))
            .collect::<ValuationResult<Vec<_>>>()?;

        scored.sort_by(|(a, ma), (b, mb)| metric.order(*ma, *mb).then_with(|| a.id.cmp(&b.id)));

        // The leading group is contiguous because the sort above is exact.
        if let Some(&(_, leader)) = scored.first() {
            let tied = scored
                .iter()
                .take_while(|(_, m)| (*m - leader).abs() <= tolerance())
                .count();
            scored[..tied].sort_by(|(a, _), (b, _)| a.id.cmp(&b.id));
        }

        let best = scored.first().map(|(_, m)| *m);
        let entries = scored
            .into_iter()
            .enumerate()
            .map(|(i, (item, m))| {
                let premium_percent = match best {
                    Some(b) if i > 0 => metric.premium_percent(m, b)?,
                    _ => Decimal::ZERO,
                };
                Ok(RankedEntry {
                    item,
                    metric: m,
                    rank: i + 1,
                    best_value: i == 0,
                    premium_percent,
                })
            })
            .collect::<ValuationResult<Vec<_>>>()?;

        Ok(Ranking { metric, entries })
    }

    /// Ranks gifts by diamonds per coin, highest first.
    pub fn rank_gifts(gifts: &[Gift]) -> ValuationResult<Ranking> {
        for gift in gifts {
            gift.validate()?;
        }
        Self::rank(gifts.iter().map(RankItem::from).collect(), Metric::Efficiency)
    }

    /// Ranks packages by price per coin, cheapest first.
    ///
    /// All packages must share one currency; prices in different currencies
    /// are not comparable.
    pub fn rank_packages(&self, packages: &[RechargePackage]) -> ValuationResult<Ranking> {
        if let Some(first) = packages.first() {
            for package in packages {
                package.validate(&self.rates)?;
                if package.currency != first.currency {
                    return Err(ValuationError::CurrencyMismatch {
                        expected: first.currency,
                        got: package.currency,
                    });
                }
            }
        }
        Self::rank(
            packages.iter().map(RankItem::from).collect(),
            Metric::CostPerUnit,
        )
    }
}
