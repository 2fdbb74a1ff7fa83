//! # Harbor Core
//!
//! Core node state for the Harbor storage network economics simulator.
//!
//! This crate provides the fundamental building blocks:
//! - `NodeType` - The four node roles of the network (storage, retrieval, index, auditor)
//! - `Node` - Per-node mutable record: stake, reputation, rewards, performance, work
//! - `NodeRegistry` - The registry owning every node for a simulation run
//! - `RandomSource` - The single injectable randomness seam
//!
//! ## Architecture
//!
//! A simulation run owns exactly one registry. Nodes are admitted through a
//! minimum-stake gate and are never removed; their performance counters and
//! work accumulators only ever grow.
//!
//! ```text
//!          ┌──────────────────────────────────────────────┐
//!          │                NODE REGISTRY                 │
//!          │                                              │
//!          │   Storage ──► [N₁ N₂ …]   Index   ──► [N…]  │
//!          │   Retrieval ► [N₁ N₂ …]   Auditor ──► [N…]  │
//!          │                                              │
//!          │   stake · reputation · rewards · work units  │
//!          └──────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod node;
pub mod registry;
pub mod rng;
pub mod types;

pub use error::*;
pub use node::*;
pub use registry::*;
pub use rng::*;
pub use types::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{RegistryError, Result};
    pub use crate::node::{Node, NodeId, NodeRequirements, PerformanceMetrics, WorkMetrics};
    pub use crate::registry::NodeRegistry;
    pub use crate::rng::{RandomSource, SeededSource};
    pub use crate::types::NodeType;
}
