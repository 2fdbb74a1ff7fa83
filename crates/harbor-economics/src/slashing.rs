//! Audits and slashing.
//!
//! ## Offense Types & Penalties
//!
//! | Offense | Stake Penalty | Detection |
//! |---------|---------------|-----------|
//! | Log Fraud | 50% | 1% chance per audit |
//! | Incorrect Data | 40% | 2% chance per audit, working nodes only |
//! | Unavailability | 20% | uptime below the role minimum |
//! | Failed Verification | 20% | external challenge (not audit-triggered) |
//! | Excess Latency | 10% | latency above the role TTFB target |
//!
//! The percentage is scaled up by `1 + ln(1 + work_units) / 10`: nodes
//! carrying more of the network's work lose more when they misbehave.
//! 70% of every slash goes to the treasury; 30% is split among auditor
//! nodes with reputation above 0.9, and is not distributed at all when no
//! auditor qualifies.

use serde::{Deserialize, Serialize};

use harbor_core::{NodeId, NodeRegistry, NodeRequirements, NodeType, RandomSource};

use crate::constants::{
    AUDITOR_REPUTATION_FLOOR, AUDITOR_SHARE, AUDIT_PROBABILITY, INCORRECT_DATA_PROBABILITY,
    LOG_FRAUD_PROBABILITY, TREASURY_SHARE,
};
use crate::supply::TokenSupplyLedger;

/// Slashing offense types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlashReason {
    /// Fabricated or manipulated activity logs
    LogFraud,
    /// Served or stored corrupt data
    IncorrectData,
    /// Smoothed uptime below the role minimum
    Unavailability,
    /// Failed an external verification challenge
    FailedVerification,
    /// Latency above the role's TTFB target
    ExcessLatency,
}

impl SlashReason {
    /// Base stake penalty fraction for this offense
    pub fn penalty_percent(&self) -> f64 {
        match self {
            Self::LogFraud => 0.5,
            Self::IncorrectData => 0.4,
            Self::Unavailability => 0.2,
            Self::FailedVerification => 0.2,
            Self::ExcessLatency => 0.1,
        }
    }

    /// Severity level (1-5)
    pub fn severity(&self) -> u8 {
        match self {
            Self::ExcessLatency => 1,
            Self::Unavailability => 2,
            Self::FailedVerification => 2,
            Self::IncorrectData => 4,
            Self::LogFraud => 5,
        }
    }

    /// Get offense name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LogFraud => "Log Fraud",
            Self::IncorrectData => "Incorrect Data",
            Self::Unavailability => "Unavailability",
            Self::FailedVerification => "Failed Verification",
            Self::ExcessLatency => "Excess Latency",
        }
    }
}

/// Outcome of one executed slash
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Slashed node
    pub node_id: NodeId,
    /// Slashed node's role
    pub node_type: NodeType,
    /// Offense found
    pub reason: SlashReason,
    /// Stake taken
    pub slash_amount: f64,
    /// Portion credited to the treasury
    pub treasury_amount: f64,
    /// Portion paid out to eligible auditors (zero when none qualify)
    pub auditor_amount: f64,
    /// Auditors that shared the bounty
    pub auditors_paid: u64,
    /// Epoch the audit ran in
    pub epoch: u64,
}

/// Probabilistic audit engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SlashingEngine {
    /// Per-epoch probability a node is audited
    pub audit_probability: f64,
    /// Probability an audit uncovers log fraud
    pub log_fraud_probability: f64,
    /// Probability an audit uncovers incorrect data
    pub incorrect_data_probability: f64,
}

impl Default for SlashingEngine {
    fn default() -> Self {
        Self {
            audit_probability: AUDIT_PROBABILITY,
            log_fraud_probability: LOG_FRAUD_PROBABILITY,
            incorrect_data_probability: INCORRECT_DATA_PROBABILITY,
        }
    }
}

impl SlashingEngine {
    /// Create an engine with the protocol audit probabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Audit every non-auditor node and slash the first offense found.
    ///
    /// Checks run in strict priority order; a node is slashed for at most
    /// one reason per audit. Already-slashed nodes remain auditable and
    /// can be penalized again.
    pub fn run_audits(
        &self,
        registry: &mut NodeRegistry,
        ledger: &mut TokenSupplyLedger,
        rng: &mut dyn RandomSource,
    ) -> Vec<AuditRecord> {
        let mut records = Vec::new();

        for node_type in NodeType::ALL {
            if !node_type.is_audited() {
                continue;
            }
            let requirements = NodeRequirements::for_type(node_type);

            for idx in 0..registry.nodes(node_type).len() {
                if !rng.chance(self.audit_probability) {
                    continue;
                }

                let node = &registry.nodes(node_type)[idx];
                let reason = if node.performance.latency_ms > requirements.target_ttfb_ms {
                    Some(SlashReason::ExcessLatency)
                } else if node.performance.uptime < requirements.min_availability {
                    Some(SlashReason::Unavailability)
                } else if rng.chance(self.log_fraud_probability) {
                    Some(SlashReason::LogFraud)
                } else if node.work.total_work_units > 0.0
                    && rng.chance(self.incorrect_data_probability)
                {
                    Some(SlashReason::IncorrectData)
                } else {
                    None
                };

                if let Some(reason) = reason {
                    records.push(self.slash(registry, ledger, node_type, idx, reason));
                }
            }
        }

        records
    }

    /// Execute a slash against the `idx`-th node of `node_type`.
    ///
    /// The penalty scales with the node's work load, the stake is reduced
    /// without clamping, and the slashed flag is set permanently. Funds
    /// split 70% treasury / 30% eligible auditors; with no eligible
    /// auditor the 30% is simply not distributed.
    pub fn slash(
        &self,
        registry: &mut NodeRegistry,
        ledger: &mut TokenSupplyLedger,
        node_type: NodeType,
        idx: usize,
        reason: SlashReason,
    ) -> AuditRecord {
        let epoch = ledger.current_epoch;

        let (node_id, slash_amount) = {
            let node = &mut registry.nodes_mut(node_type)[idx];
            let work_factor = node.work.total_work_units.ln_1p() / 10.0;
            let adjusted = reason.penalty_percent() * (1.0 + work_factor);
            let amount = node.stake * adjusted;

            node.stake -= amount;
            node.slashed = true;

            if node.stake < 0.0 {
                tracing::warn!(
                    node = %node.id,
                    stake = node.stake,
                    "stake negative after slash"
                );
            }

            (node.id, amount)
        };

        let treasury_amount = slash_amount * TREASURY_SHARE;
        ledger.treasury_balance += treasury_amount;

        let auditor_pool = slash_amount * AUDITOR_SHARE;
        let mut auditors_paid = 0u64;
        let mut auditor_amount = 0.0;
        {
            let auditors: Vec<&mut harbor_core::Node> = registry
                .nodes_mut(NodeType::Auditor)
                .iter_mut()
                .filter(|n| n.reputation > AUDITOR_REPUTATION_FLOOR)
                .collect();

            if !auditors.is_empty() {
                let bounty = auditor_pool / auditors.len() as f64;
                auditors_paid = auditors.len() as u64;
                auditor_amount = auditor_pool;
                for auditor in auditors {
                    auditor.rewards += bounty;
                }
            }
            // No eligible auditor: the pool vanishes by protocol rule.
        }

        tracing::warn!(
            node = %node_id,
            offense = reason.name(),
            slash_amount,
            auditors_paid,
            "node slashed"
        );

        AuditRecord {
            node_id,
            node_type,
            reason,
            slash_amount,
            treasury_amount,
            auditor_amount,
            auditors_paid,
            epoch,
        }
    }
}
