//! Named scenario presets and runners.
//!
//! The presets mirror the sweeps the protocol team studies: a base case,
//! an aggressive-adoption case, and a conservative case, plus a short
//! fixed-fleet run for supply/pricing behavior over a few simulated weeks.
//! All of them hand back a `MetricsHistory`; persistence and report
//! formatting belong to external tooling.

use harbor_core::NodeType;
use harbor_economics::{SessionParameters, TokenAllocation};

use crate::error::SimulationError;
use crate::growth::{EconomicParameters, GrowthProjector, NetworkGrowthParameters};
use crate::metrics::{series, MetricsHistory};
use crate::scheduler::Simulation;

/// Baseline adoption and inflation assumptions
pub fn base_case() -> (NetworkGrowthParameters, EconomicParameters) {
    (
        NetworkGrowthParameters::default(),
        EconomicParameters::default(),
    )
}

/// Aggressive adoption: double targets, higher inflation and growth
pub fn high_growth() -> (NetworkGrowthParameters, EconomicParameters) {
    (
        NetworkGrowthParameters {
            target_capacity_tbps: 200.0,
            target_storage_eb: 2.0,
            target_utilization: 0.9,
            ..Default::default()
        },
        EconomicParameters {
            inflation_rate: 0.15,
            customer_growth_rate: 0.7,
            ..Default::default()
        },
    )
}

/// Conservative adoption: half targets, lower inflation and growth
pub fn conservative() -> (NetworkGrowthParameters, EconomicParameters) {
    (
        NetworkGrowthParameters {
            target_capacity_tbps: 50.0,
            target_storage_eb: 0.5,
            target_utilization: 0.7,
            ..Default::default()
        },
        EconomicParameters {
            inflation_rate: 0.05,
            customer_growth_rate: 0.3,
            ..Default::default()
        },
    )
}

/// Run one long-horizon scenario to completion
pub fn run_scenario(
    network: NetworkGrowthParameters,
    economic: EconomicParameters,
    seed: u64,
) -> Result<MetricsHistory, SimulationError> {
    GrowthProjector::new(network, economic, seed)?.run()
}

/// Fixed reference fleet: 100 storage, 50 retrieval, 20 index, 10 auditors
fn register_reference_fleet(sim: &mut Simulation) -> Result<(), SimulationError> {
    for _ in 0..100 {
        sim.register_node(NodeType::Storage, 150_000.0)?;
    }
    for _ in 0..50 {
        sim.register_node(NodeType::Retrieval, 100_000.0)?;
    }
    for _ in 0..20 {
        sim.register_node(NodeType::Index, 75_000.0)?;
    }
    for _ in 0..10 {
        sim.register_node(NodeType::Auditor, 50_000.0)?;
    }
    Ok(())
}

/// Short-horizon run over a fixed fleet, recording the core supply,
/// pricing, and reward series each epoch.
pub fn short_run(epochs: u64, seed: u64) -> Result<MetricsHistory, SimulationError> {
    let mut sim = Simulation::with_seed(TokenAllocation::default(), seed)?;
    register_reference_fleet(&mut sim)?;

    // 1 TB stored, gigabit reads, for a 30-day session
    let session = SessionParameters {
        storage_load_bytes: 1e12,
        read_rate_bps: 1e9,
        write_rate_bps: 1e8,
        duration_seconds: 30.0 * 24.0 * 3600.0,
        request_frequency: 1.0,
        collateral: 10_000.0,
    };

    let mut history = MetricsHistory::new();
    for epoch in 0..epochs {
        let cost = sim.session_cost(&session);
        sim.advance_epoch();

        history.record(series::EPOCH, epoch as f64);
        history.record(series::NETWORK_UTILIZATION, sim.utilization());
        history.record(series::CIRCULATING_SUPPLY, sim.ledger().circulating_supply);
        history.record(series::BURNT_TOKENS, sim.ledger().burnt_tokens);
        history.record(series::TREASURY_BALANCE, sim.ledger().treasury_balance);
        history.record(series::SESSION_COST, cost);
        history.record(series::AVG_NODE_REWARDS, sim.average_node_reward());
    }

    Ok(history)
}
