//! Long-horizon growth projection.
//!
//! Drives node-count targets along a sigmoid adoption curve and a token
//! price through market cycles, feeding the epoch scheduler for a
//! multi-year horizon.

use serde::{Deserialize, Serialize};

use harbor_core::{NodeRequirements, NodeType, SeededSource};
use harbor_economics::{
    constants::EPOCHS_PER_YEAR, required_pledge, base_requirement, SessionParameters,
    TokenAllocation,
};

use crate::error::SimulationError;
use crate::metrics::{series, MetricsHistory};
use crate::scheduler::Simulation;

/// Sigmoid midpoint: adoption inflects at year five
const GROWTH_MIDPOINT_YEARS: f64 = 5.0;
/// Stake multiple used when filling growth targets
const GROWTH_STAKE_MULTIPLE: f64 = 1.5;

/// Network build-out targets
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkGrowthParameters {
    /// Target aggregate bandwidth in Tbps
    pub target_capacity_tbps: f64,
    /// Target aggregate storage in exabytes
    pub target_storage_eb: f64,
    /// Target utilization rate
    pub target_utilization: f64,
    /// Projection horizon in years
    pub years: u32,
    /// Per-node bandwidth in Gbps
    pub node_capacity_gbps: f64,
    /// Per-node storage in TB
    pub node_storage_tb: f64,
}

impl Default for NetworkGrowthParameters {
    fn default() -> Self {
        Self {
            target_capacity_tbps: 100.0,
            target_storage_eb: 1.0,
            target_utilization: 0.8,
            years: 10,
            node_capacity_gbps: 1.0,
            node_storage_tb: 10.0,
        }
    }
}

/// Macro-economic assumptions for a projection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomicParameters {
    /// Token price at year zero in USD
    pub base_token_price_usd: f64,
    /// Starting annual inflation rate
    pub inflation_rate: f64,
    /// Annual customer growth rate
    pub customer_growth_rate: f64,
    /// Market cycle length in years
    pub market_cycle_period: f64,
    /// Model boom/bust cycles in the token price
    pub economic_cycles: bool,
}

impl Default for EconomicParameters {
    fn default() -> Self {
        Self {
            base_token_price_usd: 1.0,
            inflation_rate: 0.10,
            customer_growth_rate: 0.5,
            market_cycle_period: 4.0,
            economic_cycles: true,
        }
    }
}

/// Multi-year projection driver wrapping one `Simulation`
pub struct GrowthProjector {
    network: NetworkGrowthParameters,
    economic: EconomicParameters,
    sim: Simulation,
    history: MetricsHistory,
}

impl GrowthProjector {
    /// Build a seeded projector
    pub fn new(
        network: NetworkGrowthParameters,
        economic: EconomicParameters,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        let sim = Simulation::new(
            TokenAllocation::default(),
            economic.inflation_rate,
            Box::new(SeededSource::new(seed)),
        )?;

        Ok(Self {
            network,
            economic,
            sim,
            history: MetricsHistory::new(),
        })
    }

    /// Node counts required at a point on the adoption curve
    pub fn required_nodes(&self, year: f64) -> [(NodeType, usize); 4] {
        let growth_factor = 1.0 / (1.0 + (-2.0 * (year - GROWTH_MIDPOINT_YEARS)).exp());
        let target_capacity = self.network.target_capacity_tbps * growth_factor;
        let target_storage = self.network.target_storage_eb * growth_factor;

        let storage =
            ((target_storage * 1e6) / self.network.node_storage_tb).ceil() as usize;
        let retrieval =
            ((target_capacity * 1e3) / self.network.node_capacity_gbps).ceil() as usize;
        let index = 20usize.max(((storage + retrieval) as f64).sqrt().ceil() as usize);
        let auditor = 10usize.max(((storage + retrieval) as f64).log10().ceil() as usize);

        [
            (NodeType::Storage, storage),
            (NodeType::Retrieval, retrieval),
            (NodeType::Index, index),
            (NodeType::Auditor, auditor),
        ]
    }

    /// Token price at a point in time: market cycle times long-term trend
    pub fn token_price(&self, year: f64) -> f64 {
        if !self.economic.economic_cycles {
            return self.economic.base_token_price_usd;
        }

        let cycle_phase = 2.0 * std::f64::consts::PI * year / self.economic.market_cycle_period;
        let cycle_factor = 1.0 + 0.5 * cycle_phase.sin();
        let growth_trend = 1.0 + 0.15 * year.ln_1p();

        self.economic.base_token_price_usd * cycle_factor * growth_trend
    }

    /// Advance the projection by one epoch: grow, record, simulate
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let epoch = self.sim.ledger().current_epoch;
        let year = epoch as f64 / EPOCHS_PER_YEAR as f64;

        self.grow_network(year)?;
        let price = self.token_price(year);
        self.record_metrics(epoch, year, price);
        self.sim.advance_epoch();

        Ok(())
    }

    /// Run the full configured horizon and return the collected series
    pub fn run(mut self) -> Result<MetricsHistory, SimulationError> {
        let total_epochs = self.network.years as u64 * EPOCHS_PER_YEAR;
        let epochs_per_month = EPOCHS_PER_YEAR / 12;

        for epoch in 0..total_epochs {
            if epoch % epochs_per_month == 0 {
                let year = epoch as f64 / EPOCHS_PER_YEAR as f64;
                tracing::info!("projecting year {year:.1}");
            }
            self.step()?;
        }

        Ok(self.history)
    }

    /// Collected series so far
    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }

    /// The wrapped simulation
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Register nodes until every role meets its target; never removes
    fn grow_network(&mut self, year: f64) -> Result<(), SimulationError> {
        for (node_type, required) in self.required_nodes(year) {
            let stake = NodeRequirements::for_type(node_type).min_stake * GROWTH_STAKE_MULTIPLE;
            while self.sim.registry().count(node_type) < required {
                self.sim.register_node(node_type, stake)?;
            }
        }
        Ok(())
    }

    fn record_metrics(&mut self, epoch: u64, year: f64, price: f64) {
        let retrieval_count = self.sim.registry().count(NodeType::Retrieval) as f64;
        let storage_count = self.sim.registry().count(NodeType::Storage) as f64;

        self.history.record(series::EPOCH, epoch as f64);
        self.history.record(series::YEAR, year);
        self.history.record(
            series::NETWORK_CAPACITY_TBPS,
            retrieval_count * self.network.node_capacity_gbps / 1000.0,
        );
        self.history.record(
            series::STORAGE_CAPACITY_EB,
            storage_count * self.network.node_storage_tb / 1e6,
        );

        let utilization = self.sim.utilization();
        self.history.record(series::NETWORK_UTILIZATION, utilization);
        self.history.record(series::TOKEN_PRICE_USD, price);
        self.history
            .record(series::TOTAL_NODES, self.sim.registry().total_count() as f64);
        self.history
            .record(series::TOKENS_STAKED, self.sim.registry().total_staked());

        let ledger = self.sim.ledger();
        self.history
            .record(series::CIRCULATING_SUPPLY, ledger.circulating_supply);
        self.history.record(
            series::TOKENS_ISSUED,
            ledger.circulating_supply + ledger.burnt_tokens,
        );
        self.history
            .record(series::FOUNDATION_FEES, ledger.treasury_balance);

        // A day of fee draws approximates daily customer revenue.
        let daily_revenue: f64 = (0..24).map(|_| self.sim.network_fees()).sum();
        self.history.record(series::CUSTOMER_REVENUE, daily_revenue);

        self.history.record(
            series::NODE_PROFITABILITY,
            self.sim.average_node_reward() * price,
        );

        let circulating = self.sim.ledger().circulating_supply;
        let min_stake = self
            .sim
            .registry()
            .nodes(NodeType::Storage)
            .first()
            .map(|n| required_pledge(n, circulating))
            .unwrap_or_else(|| base_requirement(NodeType::Storage));
        self.history.record(series::MIN_STAKE_PER_NODE, min_stake);

        let price_per_gb = self.sim.session_cost(&SessionParameters::reference_gb());
        self.history.record(series::CUSTOMER_PRICE_PER_GB, price_per_gb);
    }
}
