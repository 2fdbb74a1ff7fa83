//! # Harbor Simulation Engine
//!
//! Drives the Harbor economic model through discrete hourly epochs.
//!
//! ## Epoch Pipeline
//!
//! ```text
//! ┌──────┐   ┌─────────────┐   ┌──────┐   ┌─────────┐   ┌────────┐   ┌────────┐
//! │ Idle ├──►│ Performance ├──►│ Work ├──►│ Rewards ├──►│ Audits ├──►│ Supply │
//! └──────┘   └─────────────┘   └──────┘   └─────────┘   └────────┘   └───┬────┘
//!     ▲                                                                  │
//!     └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `Simulation` owns the node registry, the supply ledger, and the
//! injected randomness for one run; epochs are atomic and strictly
//! sequential, and multiple independent simulations can run in-process.
//! `GrowthProjector` layers a multi-year sigmoid growth curve and a
//! cyclical token-price model on top, feeding the scheduler repeatedly.
//!
//! The sole output handoff is `MetricsHistory`: a flat mapping from metric
//! name to per-epoch numeric series, consumed by external reporting tools.

pub mod error;
pub mod growth;
pub mod metrics;
pub mod scenarios;
pub mod scheduler;

pub use error::SimulationError;
pub use growth::{EconomicParameters, GrowthProjector, NetworkGrowthParameters};
pub use metrics::{series, MetricsHistory};
pub use scheduler::{EpochPhase, EpochReport, Simulation};
