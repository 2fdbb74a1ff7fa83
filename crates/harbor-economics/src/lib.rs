//! # Harbor Economics - HBR Tokenomics & Node Incentives
//!
//! Economic model for the Harbor storage network simulator.
//!
//! ## Key Features
//!
//! - **Dual minting**: flat per-type issuance weighted by reputation, plus
//!   KPI-based issuance proportional to measured work
//! - **Decaying inflation**: the hourly minting rate shrinks by 0.1% per epoch
//! - **Probabilistic audits**: offense-specific slashing scaled by work load
//! - **Fee burn**: utilization-driven network fees, 20% burned
//!
//! ## Reward Split Per Epoch
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  HOURLY ISSUANCE (inflation)                │
//! ├───────────────────────────┬─────────────────────────────────┤
//! │  Simple minting (40%)     │  KPI minting (60%, alpha)       │
//! │  split by type allocation │  split by per-type KPI weight   │
//! │  weighted by reputation   │  proportional to work units     │
//! └───────────────────────────┴─────────────────────────────────┘
//! ```

pub mod allocation;
pub mod pricing;
pub mod reputation;
pub mod rewards;
pub mod slashing;
pub mod staking;
pub mod supply;

// Re-exports
pub use allocation::{ConfigError, TokenAllocation};
pub use pricing::{session_cost, SessionParameters};
pub use reputation::reputation;
pub use rewards::{distribute_rewards, EpochRewardSummary};
pub use slashing::{AuditRecord, SlashReason, SlashingEngine};
pub use staking::{base_requirement, required_pledge};
pub use supply::{network_utilization, TokenSupplyLedger};

/// HBR token constants
pub mod constants {
    /// Token symbol
    pub const SYMBOL: &str = "HBR";

    /// Token name
    pub const NAME: &str = "Harbor Storage Credit";

    /// Protocol supply cap: 100 billion HBR
    pub const TOTAL_SUPPLY: f64 = 100_000_000_000.0;

    /// Starting hourly-minting inflation rate: 10% annual
    pub const INITIAL_INFLATION_RATE: f64 = 0.10;

    /// Inflation decay factor applied each epoch
    pub const INFLATION_DECAY: f64 = 0.999;

    /// Hourly epochs per year
    pub const EPOCHS_PER_YEAR: u64 = 8760;

    /// Epoch length: one hour of network time
    pub const EPOCH_DURATION_SECS: u64 = 3600;

    /// Per-epoch probability that a node is audited
    pub const AUDIT_PROBABILITY: f64 = 0.05;

    /// Probability an audit uncovers log fraud
    pub const LOG_FRAUD_PROBABILITY: f64 = 0.01;

    /// Probability an audit uncovers incorrect data (working nodes only)
    pub const INCORRECT_DATA_PROBABILITY: f64 = 0.02;

    /// Share of slashed stake routed to the treasury
    pub const TREASURY_SHARE: f64 = 0.7;

    /// Share of slashed stake split among eligible auditors
    pub const AUDITOR_SHARE: f64 = 0.3;

    /// Minimum reputation for an auditor to collect slash bounties
    pub const AUDITOR_REPUTATION_FLOOR: f64 = 0.9;

    /// Base network fee per epoch, in HBR
    pub const BASE_NETWORK_FEE: f64 = 1000.0;

    /// Share of collected fees burned, scaled by utilization
    pub const FEE_BURN_RATE: f64 = 0.2;

    /// Uptime above which a node counts toward network utilization
    pub const UPTIME_HEALTHY_THRESHOLD: f64 = 0.8;

    /// Storage price in $/GB/month
    pub const STORAGE_PRICE_PER_GB_MONTH: f64 = 0.02;

    /// Read price in $/GB
    pub const READ_PRICE_PER_GB: f64 = 0.01;

    /// Write price in $/GB
    pub const WRITE_PRICE_PER_GB: f64 = 0.015;
}

pub use constants::*;
