//! Protocol-wide token allocation and minting split.
//!
//! ## Genesis Allocation
//!
//! | Category | Share |
//! |----------|-------|
//! | Initial contributors | 20% |
//! | Early backers | 17% |
//! | R&D | 20% |
//! | Ecosystem | 20% |
//! | Network growth | 23% |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use harbor_core::NodeType;

use crate::constants::TOTAL_SUPPLY;

/// Configuration errors caught at simulation construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Category allocation percentages must sum to 1.0
    #[error("category allocations sum to {sum}, expected 1.0")]
    AllocationSum { sum: f64 },

    /// Per-type KPI weights must sum to 1.0
    #[error("KPI weights sum to {sum}, expected 1.0")]
    KpiWeightSum { sum: f64 },

    /// KPI-vs-simple split must be a fraction
    #[error("alpha {alpha} outside [0, 1]")]
    InvalidAlpha { alpha: f64 },

    /// Supply cap must be positive
    #[error("total supply {supply} must be positive")]
    NonPositiveSupply { supply: f64 },
}

/// Static protocol constants: genesis categories, supply cap, minting split.
///
/// Read-only after construction; `validate` is the fail-fast check callers
/// run before starting a simulation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenAllocation {
    /// Initial contributors share
    pub initial_contributors: f64,
    /// Early backers share
    pub early_backers: f64,
    /// Research & development share
    pub r_and_d: f64,
    /// Ecosystem fund share
    pub ecosystem: f64,
    /// Network growth share
    pub network_growth: f64,
    /// Protocol supply cap
    pub total_supply: f64,
    /// Fraction of issuance that is KPI-based (the rest is simple minting)
    pub alpha: f64,
    /// KPI weight: storage nodes
    pub w_storage: f64,
    /// KPI weight: retrieval nodes
    pub w_retrieval: f64,
    /// KPI weight: index nodes
    pub w_index: f64,
    /// KPI weight: auditor nodes
    pub w_auditor: f64,
}

impl Default for TokenAllocation {
    fn default() -> Self {
        Self {
            initial_contributors: 0.20,
            early_backers: 0.17,
            r_and_d: 0.20,
            ecosystem: 0.20,
            network_growth: 0.23,
            total_supply: TOTAL_SUPPLY,
            alpha: 0.6,
            w_storage: 0.4,
            w_retrieval: 0.3,
            w_index: 0.2,
            w_auditor: 0.1,
        }
    }
}

impl TokenAllocation {
    /// KPI weight for a node role
    pub fn kpi_weight(&self, node_type: NodeType) -> f64 {
        match node_type {
            NodeType::Storage => self.w_storage,
            NodeType::Retrieval => self.w_retrieval,
            NodeType::Index => self.w_index,
            NodeType::Auditor => self.w_auditor,
        }
    }

    /// Simple-minting allocation share for a node role.
    ///
    /// The protocol uses one weight table for both minting components.
    pub fn type_share(&self, node_type: NodeType) -> f64 {
        self.kpi_weight(node_type)
    }

    /// Fail-fast configuration check
    pub fn validate(&self) -> Result<(), ConfigError> {
        let category_sum = self.initial_contributors
            + self.early_backers
            + self.r_and_d
            + self.ecosystem
            + self.network_growth;
        if (category_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::AllocationSum { sum: category_sum });
        }

        let weight_sum = self.w_storage + self.w_retrieval + self.w_index + self.w_auditor;
        if (weight_sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::KpiWeightSum { sum: weight_sum });
        }

        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(ConfigError::InvalidAlpha { alpha: self.alpha });
        }

        if self.total_supply <= 0.0 {
            return Err(ConfigError::NonPositiveSupply {
                supply: self.total_supply,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allocation_valid() {
        assert!(TokenAllocation::default().validate().is_ok());
    }

    #[test]
    fn test_weight_table() {
        let allocation = TokenAllocation::default();
        assert_eq!(allocation.kpi_weight(NodeType::Storage), 0.4);
        assert_eq!(allocation.kpi_weight(NodeType::Retrieval), 0.3);
        assert_eq!(allocation.kpi_weight(NodeType::Index), 0.2);
        assert_eq!(allocation.kpi_weight(NodeType::Auditor), 0.1);

        let sum: f64 = NodeType::ALL
            .iter()
            .map(|&t| allocation.type_share(t))
            .sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_allocation_serialization() {
        let allocation = TokenAllocation::default();
        let json = serde_json::to_string(&allocation).unwrap();
        let back: TokenAllocation = serde_json::from_str(&json).unwrap();

        assert_eq!(back.alpha, allocation.alpha);
        assert_eq!(back.total_supply, allocation.total_supply);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn test_bad_category_sum_rejected() {
        let allocation = TokenAllocation {
            network_growth: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            allocation.validate(),
            Err(ConfigError::AllocationSum { .. })
        ));
    }

    #[test]
    fn test_bad_weight_sum_rejected() {
        let allocation = TokenAllocation {
            w_auditor: 0.4,
            ..Default::default()
        };
        assert!(matches!(
            allocation.validate(),
            Err(ConfigError::KpiWeightSum { .. })
        ));
    }

    #[test]
    fn test_bad_alpha_rejected() {
        let allocation = TokenAllocation {
            alpha: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            allocation.validate(),
            Err(ConfigError::InvalidAlpha { .. })
        ));
    }
}
