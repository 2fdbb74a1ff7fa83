//! Node registry: owns every node for the lifetime of a simulation run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::node::{Node, NodeId, NodeRequirements};
use crate::types::NodeType;

/// Registry of all network nodes, keyed by role.
///
/// Admission is gated on the role's minimum stake; nodes are never removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRegistry {
    nodes: HashMap<NodeType, Vec<Node>>,
    registered_total: u64,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Create an empty registry with a slot per role
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        for node_type in NodeType::ALL {
            nodes.insert(node_type, Vec::new());
        }
        Self {
            nodes,
            registered_total: 0,
        }
    }

    /// Register a node, enforcing the role's minimum-stake gate
    pub fn register(&mut self, node_type: NodeType, stake: f64) -> Result<NodeId> {
        let requirements = NodeRequirements::for_type(node_type);
        if stake < requirements.min_stake {
            return Err(RegistryError::InsufficientStake {
                node_type,
                required: requirements.min_stake,
                offered: stake,
            });
        }

        let id = NodeId::derive(node_type, self.registered_total);
        self.registered_total += 1;
        self.nodes_mut(node_type).push(Node::new(id, node_type, stake));

        tracing::info!(%id, role = %node_type, stake, "node registered");
        Ok(id)
    }

    /// Nodes of one role
    pub fn nodes(&self, node_type: NodeType) -> &[Node] {
        self.nodes
            .get(&node_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable nodes of one role
    pub fn nodes_mut(&mut self, node_type: NodeType) -> &mut Vec<Node> {
        self.nodes.entry(node_type).or_default()
    }

    /// Iterate every node across all roles
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        NodeType::ALL
            .into_iter()
            .flat_map(|t| self.nodes(t).iter())
    }

    /// Iterate every node mutably across all roles
    pub fn all_nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        let mut buckets: Vec<(NodeType, &mut Vec<Node>)> =
            self.nodes.iter_mut().map(|(&t, v)| (t, v)).collect();
        buckets.sort_by_key(|(t, _)| {
            NodeType::ALL.iter().position(|x| x == t).unwrap_or(NodeType::ALL.len())
        });
        buckets.into_iter().flat_map(|(_, v)| v.iter_mut())
    }

    /// Node count for one role
    pub fn count(&self, node_type: NodeType) -> usize {
        self.nodes(node_type).len()
    }

    /// Total node count across roles
    pub fn total_count(&self) -> usize {
        NodeType::ALL.iter().map(|&t| self.count(t)).sum()
    }

    /// Sum of all bonded stake
    pub fn total_staked(&self) -> f64 {
        self.all_nodes().map(|n| n.stake).sum()
    }

    /// Sum of all rewards earned so far
    pub fn total_rewards(&self) -> f64 {
        self.all_nodes().map(|n| n.rewards).sum()
    }
}
