//! Reward distribution: simple + KPI-based minting.
//!
//! ## Minting Components
//!
//! 1. **Simple minting**: an hourly pool `supply * inflation * (1-alpha) / 8760`
//!    split by per-type allocation, then weighted by each eligible node's
//!    reputation relative to its type's eligible count.
//! 2. **KPI minting**: a pool `supply * inflation * alpha * weight[type]`
//!    distributed proportionally to each node's share of the type's total
//!    work units.
//!
//! Slashed nodes are excluded from both components and from the simple-mint
//! reputation normalization; their work still counts in the KPI denominator.

use serde::{Deserialize, Serialize};

use harbor_core::{NodeRegistry, NodeType};

use crate::allocation::TokenAllocation;
use crate::constants::EPOCHS_PER_YEAR;

/// Totals minted in one reward pass
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EpochRewardSummary {
    /// Simple-minting total credited
    pub simple_minted: f64,
    /// KPI-minting total credited
    pub kpi_minted: f64,
    /// Sum of both components
    pub total_minted: f64,
    /// Nodes that received a reward
    pub nodes_rewarded: u64,
}

/// Distribute one epoch of minting rewards across the registry.
///
/// Mutates `node.rewards` in place and returns the minted totals for the
/// supply ledger to reconcile against.
pub fn distribute_rewards(
    registry: &mut NodeRegistry,
    allocation: &TokenAllocation,
    inflation_rate: f64,
) -> EpochRewardSummary {
    let hourly_pool = allocation.total_supply * inflation_rate * (1.0 - allocation.alpha)
        / EPOCHS_PER_YEAR as f64;

    let mut summary = EpochRewardSummary::default();

    for node_type in NodeType::ALL {
        let nodes = registry.nodes_mut(node_type);

        let eligible = nodes.iter().filter(|n| !n.slashed).count();
        if eligible == 0 {
            continue;
        }

        // KPI denominator spans the whole type, slashed nodes included.
        let total_type_work: f64 = nodes.iter().map(|n| n.work.total_work_units).sum();

        let type_share = hourly_pool * allocation.type_share(node_type);
        let kpi_pool = allocation.total_supply
            * inflation_rate
            * allocation.alpha
            * allocation.kpi_weight(node_type);

        for node in nodes.iter_mut().filter(|n| !n.slashed) {
            let simple = type_share * node.reputation / eligible as f64;

            let kpi = if total_type_work > 0.0 {
                kpi_pool * node.work.total_work_units / total_type_work
            } else {
                0.0
            };

            node.rewards += simple + kpi;
            summary.simple_minted += simple;
            summary.kpi_minted += kpi;
            summary.nodes_rewarded += 1;
        }
    }

    summary.total_minted = summary.simple_minted + summary.kpi_minted;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_INFLATION_RATE;

    fn registry_with(storage: usize, retrieval: usize) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for _ in 0..storage {
            registry.register(NodeType::Storage, 150_000.0).unwrap();
        }
        for _ in 0..retrieval {
            registry.register(NodeType::Retrieval, 75_000.0).unwrap();
        }
        registry
    }

    #[test]
    fn test_zero_work_means_zero_kpi() {
        let mut registry = registry_with(3, 2);
        let allocation = TokenAllocation::default();

        let summary = distribute_rewards(&mut registry, &allocation, INITIAL_INFLATION_RATE);

        assert_eq!(summary.kpi_minted, 0.0);
        assert!(summary.simple_minted > 0.0);
        assert_eq!(summary.nodes_rewarded, 5);
    }

    #[test]
    fn test_simple_minting_split() {
        let mut registry = registry_with(2, 0);
        let allocation = TokenAllocation::default();

        let summary = distribute_rewards(&mut registry, &allocation, INITIAL_INFLATION_RATE);

        // Both nodes have reputation 1.0: each gets half the storage type share.
        let hourly = allocation.total_supply * INITIAL_INFLATION_RATE * (1.0 - allocation.alpha)
            / EPOCHS_PER_YEAR as f64;
        let expected_each = hourly * allocation.type_share(NodeType::Storage) / 2.0;

        for node in registry.nodes(NodeType::Storage) {
            assert!((node.rewards - expected_each).abs() < 1e-6);
        }
        assert!((summary.total_minted - 2.0 * expected_each).abs() < 1e-6);
    }

    #[test]
    fn test_kpi_proportional_to_work() {
        let mut registry = registry_with(2, 0);
        {
            let nodes = registry.nodes_mut(NodeType::Storage);
            nodes[0].work.total_work_units = 30.0;
            nodes[1].work.total_work_units = 10.0;
        }
        let allocation = TokenAllocation::default();

        distribute_rewards(&mut registry, &allocation, INITIAL_INFLATION_RATE);

        let kpi_pool = allocation.total_supply
            * INITIAL_INFLATION_RATE
            * allocation.alpha
            * allocation.kpi_weight(NodeType::Storage);
        let hourly = allocation.total_supply * INITIAL_INFLATION_RATE * (1.0 - allocation.alpha)
            / EPOCHS_PER_YEAR as f64;
        let simple_each = hourly * allocation.type_share(NodeType::Storage) / 2.0;

        let nodes = registry.nodes(NodeType::Storage);
        assert!((nodes[0].rewards - (simple_each + kpi_pool * 0.75)).abs() < 1e-3);
        assert!((nodes[1].rewards - (simple_each + kpi_pool * 0.25)).abs() < 1e-3);
    }

    #[test]
    fn test_slashed_nodes_receive_nothing() {
        let mut registry = registry_with(2, 0);
        {
            let nodes = registry.nodes_mut(NodeType::Storage);
            nodes[0].slashed = true;
            nodes[0].work.total_work_units = 50.0;
            nodes[1].work.total_work_units = 50.0;
        }
        let allocation = TokenAllocation::default();

        let summary = distribute_rewards(&mut registry, &allocation, INITIAL_INFLATION_RATE);

        let nodes = registry.nodes(NodeType::Storage);
        assert_eq!(nodes[0].rewards, 0.0);
        assert!(nodes[1].rewards > 0.0);
        assert_eq!(summary.nodes_rewarded, 1);

        // The slashed node's work still dilutes the survivor's KPI share.
        let kpi_pool = allocation.total_supply
            * INITIAL_INFLATION_RATE
            * allocation.alpha
            * allocation.kpi_weight(NodeType::Storage);
        assert!((summary.kpi_minted - kpi_pool * 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_all_slashed_type_mints_nothing() {
        let mut registry = registry_with(2, 1);
        for node in registry.nodes_mut(NodeType::Storage) {
            node.slashed = true;
            node.work.total_work_units = 10.0;
        }
        let allocation = TokenAllocation::default();

        let summary = distribute_rewards(&mut registry, &allocation, INITIAL_INFLATION_RATE);

        for node in registry.nodes(NodeType::Storage) {
            assert_eq!(node.rewards, 0.0);
        }
        assert_eq!(summary.nodes_rewarded, 1); // only the retrieval node
    }
}
