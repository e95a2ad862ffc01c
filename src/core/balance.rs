//! Ranks wallet balances by blockchain priority and values them in USD.
//!
//! The pipeline has two stages. Ordering (filter + stable sort) depends only on
//! the balances and the priority table, while valuation depends on prices.
//! [`BalanceBook`] keeps the ordering around so that a price update only
//! re-values the rows.
use crate::core::money::format_fixed;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Priority of blockchains missing from the [`PriorityTable`]. Balances at or
/// below it are excluded from the ranking.
pub const EXCLUDED_PRIORITY: i32 = -99;

/// Currency code to unit USD price.
pub type PriceTable = HashMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BalanceRecord {
    pub currency: String,
    pub amount: f64,
    pub blockchain: String,
}

/// Blockchain name to priority. Higher priorities sort first.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PriorityTable(HashMap<String, i32>);

impl PriorityTable {
    pub fn new(priorities: HashMap<String, i32>) -> Self {
        Self(priorities)
    }

    pub fn priority(&self, blockchain: &str) -> i32 {
        self.0
            .get(blockchain)
            .copied()
            .unwrap_or(EXCLUDED_PRIORITY)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self(
            [
                ("Osmosis", 100),
                ("Ethereum", 50),
                ("Arbitrum", 30),
                ("Zilliqa", 20),
                ("Neo", 20),
            ]
            .into_iter()
            .map(|(chain, priority)| (chain.to_string(), priority))
            .collect(),
        )
    }
}

impl<S: Into<String>> FromIterator<(S, i32)> for PriorityTable {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A render-ready row of the wallet view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBalance {
    pub currency: String,
    pub blockchain: String,
    pub amount: f64,
    pub formatted_amount: String,
    /// `None` when the price table has no entry for the currency.
    pub usd_value: Option<f64>,
}

impl RankedBalance {
    /// Stable identifier for list rendering. The same currency can be held on
    /// more than one chain, so the chain is part of the key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.currency, self.blockchain)
    }
}

fn is_ranked(balance: &BalanceRecord, priorities: &PriorityTable) -> bool {
    balance.amount > 0.0 && priorities.priority(&balance.blockchain) > EXCLUDED_PRIORITY
}

/// Filters out empty balances and unknown chains, then sorts by descending
/// priority. The sort is stable: equal priorities keep their input order.
pub fn order_balances<'a>(
    balances: &'a [BalanceRecord],
    priorities: &PriorityTable,
) -> Vec<&'a BalanceRecord> {
    let mut ordered: Vec<&BalanceRecord> = balances
        .iter()
        .filter(|b| is_ranked(b, priorities))
        .collect();
    ordered.sort_by_key(|b| Reverse(priorities.priority(&b.blockchain)));
    debug!(
        total = balances.len(),
        ranked = ordered.len(),
        "Ordered wallet balances"
    );
    ordered
}

fn value_balance(balance: &BalanceRecord, prices: &PriceTable) -> RankedBalance {
    let usd_value = prices.get(&balance.currency).map(|p| p * balance.amount);
    if usd_value.is_none() {
        debug!("No USD price for {}", balance.currency);
    }
    RankedBalance {
        currency: balance.currency.clone(),
        blockchain: balance.blockchain.clone(),
        amount: balance.amount,
        formatted_amount: format_fixed(balance.amount, 2),
        usd_value,
    }
}

/// Values already ordered balances against `prices`, preserving their order.
pub fn value_balances<'a, I>(ordered: I, prices: &PriceTable) -> Vec<RankedBalance>
where
    I: IntoIterator<Item = &'a BalanceRecord>,
{
    ordered
        .into_iter()
        .map(|b| value_balance(b, prices))
        .collect()
}

pub fn rank(
    balances: &[BalanceRecord],
    prices: &PriceTable,
    priorities: &PriorityTable,
) -> Vec<RankedBalance> {
    value_balances(order_balances(balances, priorities), prices)
}

/// Caches the price-independent ordering of a balance snapshot.
pub struct BalanceBook {
    balances: Arc<[BalanceRecord]>,
    priorities: PriorityTable,
    order: Vec<usize>,
}

impl BalanceBook {
    pub fn new(balances: Arc<[BalanceRecord]>, priorities: PriorityTable) -> Self {
        let order = Self::compute_order(&balances, &priorities);
        Self {
            balances,
            priorities,
            order,
        }
    }

    fn compute_order(balances: &[BalanceRecord], priorities: &PriorityTable) -> Vec<usize> {
        let mut order: Vec<usize> = (0..balances.len())
            .filter(|&i| is_ranked(&balances[i], priorities))
            .collect();
        order.sort_by_key(|&i| Reverse(priorities.priority(&balances[i].blockchain)));
        order
    }

    /// Replaces the balance snapshot. The ordering is recomputed only when
    /// `balances` is a different allocation from the current snapshot; returns
    /// whether it was.
    pub fn update_balances(&mut self, balances: Arc<[BalanceRecord]>) -> bool {
        if Arc::ptr_eq(&self.balances, &balances) {
            debug!("Balance snapshot unchanged, keeping order");
            return false;
        }
        self.order = Self::compute_order(&balances, &self.priorities);
        self.balances = balances;
        true
    }

    pub fn ordered(&self) -> impl Iterator<Item = &BalanceRecord> {
        self.order.iter().map(|&i| &self.balances[i])
    }

    pub fn value(&self, prices: &PriceTable) -> Vec<RankedBalance> {
        value_balances(self.ordered(), prices)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
