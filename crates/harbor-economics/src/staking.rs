//! Stake requirements that scale with network size.
//!
//! Registration is gated on the static per-role minimum (see
//! `NodeRequirements`); the *pledge* a node is expected to maintain grows
//! with circulating supply and with the work it is responsible for.

use harbor_core::{Node, NodeType};

/// Static base pledge per node role
pub fn base_requirement(node_type: NodeType) -> f64 {
    match node_type {
        NodeType::Storage => 100_000.0,
        NodeType::Retrieval => 75_000.0,
        NodeType::Index => 50_000.0,
        NodeType::Auditor => 25_000.0,
    }
}

/// Required pledge for a node given the current circulating supply.
///
/// Square-root scaling with supply, logarithmic scaling with the node's
/// accumulated work units.
pub fn required_pledge(node: &Node, circulating_supply: f64) -> f64 {
    let supply_factor = (circulating_supply / 1e9).sqrt();
    let work_factor = node.work.total_work_units.ln_1p();

    base_requirement(node.node_type) * supply_factor * (1.0 + 0.1 * work_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_core::NodeId;

    fn node(node_type: NodeType) -> Node {
        Node::new(NodeId::derive(node_type, 0), node_type, 150_000.0)
    }

    #[test]
    fn test_base_matches_registration_minimums() {
        for node_type in NodeType::ALL {
            let req = harbor_core::NodeRequirements::for_type(node_type);
            assert_eq!(base_requirement(node_type), req.min_stake);
        }
    }

    #[test]
    fn test_pledge_at_reference_supply() {
        // at 1e9 circulating and zero work the pledge equals the base
        let n = node(NodeType::Storage);
        assert!((required_pledge(&n, 1e9) - 100_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_pledge_grows_with_supply_and_work() {
        let mut n = node(NodeType::Retrieval);
        let lean = required_pledge(&n, 1e9);
        let rich = required_pledge(&n, 4e9);
        assert!((rich - 2.0 * lean).abs() < 1e-6);

        n.work.total_work_units = 1000.0;
        assert!(required_pledge(&n, 4e9) > rich);
    }
}
