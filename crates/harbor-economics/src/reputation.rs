//! Reputation scoring.
//!
//! ## Score Components
//!
//! | Component | Weight | Source |
//! |-----------|--------|--------|
//! | Uptime | 40% | smoothed availability |
//! | Latency | 40% | distance to the role's TTFB target |
//! | Standing | 20% | zero once slashed |
//!
//! Retrieval nodes earn up to a 20% multiplier for cache performance;
//! the final score is clamped to 1.0.

use harbor_core::{Node, NodeType};

/// Uptime component weight
const UPTIME_WEIGHT: f64 = 0.4;
/// Latency component weight
const LATENCY_WEIGHT: f64 = 0.4;
/// Standing (unslashed) component weight
const STANDING_WEIGHT: f64 = 0.2;
/// Maximum cache-performance multiplier bonus for retrieval nodes
const CACHE_BONUS: f64 = 0.2;

/// Compute a node's reputation score in [0, 1].
///
/// Total because uptime and latency are always well-defined numeric state;
/// latency beyond the target floors the latency component at zero.
pub fn reputation(node: &Node) -> f64 {
    let target = node.node_type.ttfb_target_ms();
    let latency_score = 1.0 - (node.performance.latency_ms / target).min(1.0);
    let standing = if node.slashed { 0.0 } else { 1.0 };

    let base = UPTIME_WEIGHT * node.performance.uptime
        + LATENCY_WEIGHT * latency_score
        + STANDING_WEIGHT * standing;

    let score = if node.node_type == NodeType::Retrieval && node.performance.total_requests > 0
    {
        base * (1.0 + CACHE_BONUS * node.performance.cache_hit_rate())
    } else {
        base
    };

    score.min(1.0)
}
