//! Node role types for the Harbor network.
//!
//! ## Node Roles
//!
//! | Role | Work Counter | TTFB Target | Earns From |
//! |------|--------------|-------------|------------|
//! | Storage | bytes stored | 150 ms | storage work share |
//! | Retrieval | bytes served | 70 ms | retrieval work + cache bonus |
//! | Index | indices served | 100 ms | index work share |
//! | Auditor | none | n/a | audit bounties + type allocation |

use serde::{Deserialize, Serialize};

/// Node role within the storage network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    /// Object storage: holds customer data at rest
    Storage,
    /// Retrieval acceleration: serves reads, maintains a cache
    Retrieval,
    /// Indexing: answers content lookups
    Index,
    /// Auditor (fisherman): verifies other nodes, collects slash bounties
    Auditor,
}

impl NodeType {
    /// All node roles, in registry iteration order
    pub const ALL: [NodeType; 4] = [
        NodeType::Storage,
        NodeType::Retrieval,
        NodeType::Index,
        NodeType::Auditor,
    ];

    /// Time-to-first-byte target in milliseconds.
    ///
    /// Auditors have no latency SLA; they fall back to the 100 ms default
    /// wherever a finite target is needed.
    pub fn ttfb_target_ms(&self) -> f64 {
        match self {
            Self::Storage => 150.0,
            Self::Retrieval => 70.0,
            Self::Index => 100.0,
            Self::Auditor => 100.0,
        }
    }

    /// Is this role subject to random audits?
    pub fn is_audited(&self) -> bool {
        !matches!(self, Self::Auditor)
    }

    /// Get role name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Storage => "Storage",
            Self::Retrieval => "Retrieval",
            Self::Index => "Index",
            Self::Auditor => "Auditor",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
