//! Metrics history: the simulation's sole output handoff.
//!
//! A flat mapping from metric name to an ordered per-epoch numeric series.
//! External reporting tools consume the serialized form; nothing here
//! formats or persists anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical series names recorded by the built-in runners
pub mod series {
    pub const EPOCH: &str = "epoch";
    pub const YEAR: &str = "year";
    pub const NETWORK_UTILIZATION: &str = "network_utilization";
    pub const CIRCULATING_SUPPLY: &str = "circulating_supply";
    pub const BURNT_TOKENS: &str = "burnt_tokens";
    pub const TREASURY_BALANCE: &str = "treasury_balance";
    pub const SESSION_COST: &str = "session_cost";
    pub const AVG_NODE_REWARDS: &str = "avg_node_rewards";
    pub const NETWORK_CAPACITY_TBPS: &str = "network_capacity_tbps";
    pub const STORAGE_CAPACITY_EB: &str = "storage_capacity_eb";
    pub const TOKEN_PRICE_USD: &str = "token_price_usd";
    pub const TOTAL_NODES: &str = "total_nodes";
    pub const TOKENS_STAKED: &str = "tokens_staked";
    pub const TOKENS_ISSUED: &str = "tokens_issued";
    pub const CUSTOMER_REVENUE: &str = "customer_revenue";
    pub const FOUNDATION_FEES: &str = "foundation_fees";
    pub const NODE_PROFITABILITY: &str = "node_profitability";
    pub const MIN_STAKE_PER_NODE: &str = "min_stake_per_node";
    pub const CUSTOMER_PRICE_PER_GB: &str = "customer_price_per_gb";
}

/// Named per-epoch numeric series, in stable name order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MetricsHistory {
    series: BTreeMap<String, Vec<f64>>,
}

impl MetricsHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to a named series, creating it on first use
    pub fn record(&mut self, name: &str, value: f64) {
        self.series.entry(name.to_string()).or_default().push(value);
    }

    /// A series by name
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Recorded series names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Length of a series; zero when absent
    pub fn len(&self, name: &str) -> usize {
        self.get(name).map_or(0, <[f64]>::len)
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut history = MetricsHistory::new();
        history.record(series::EPOCH, 0.0);
        history.record(series::EPOCH, 1.0);
        history.record(series::BURNT_TOKENS, 12.5);

        assert_eq!(history.get(series::EPOCH), Some(&[0.0, 1.0][..]));
        assert_eq!(history.len(series::BURNT_TOKENS), 1);
        assert_eq!(history.len("unknown"), 0);
        assert!(history.get("unknown").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let mut history = MetricsHistory::new();
        history.record("zeta", 1.0);
        history.record("alpha", 2.0);

        let names: Vec<&str> = history.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_serialized_form_is_flat() {
        let mut history = MetricsHistory::new();
        history.record(series::TREASURY_BALANCE, 7.0);

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["series"]["treasury_balance"][0], 7.0);
    }
}
