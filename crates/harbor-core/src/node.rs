//! Per-node mutable state: stake, reputation, rewards, performance, work.

use serde::{Deserialize, Serialize};

use crate::types::NodeType;
use crate::RandomSource;

/// Requests counted per retrieval-cache sampling window
const CACHE_WINDOW_REQUESTS: u64 = 100;

/// Uptime exponential smoothing factor
pub const UPTIME_DECAY: f64 = 0.95;

/// Unique node identifier, derived at registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId([u8; 32]);

impl NodeId {
    /// Derive an id from the node role and its registration ordinal
    pub fn derive(node_type: NodeType, ordinal: u64) -> Self {
        let digest = blake3::hash(
            &[node_type.name().as_bytes(), &ordinal.to_le_bytes()].concat(),
        );
        Self(*digest.as_bytes())
    }

    /// Raw id bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.0[..8]))
    }
}

/// Raw per-epoch performance counters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Exponentially smoothed availability in [0, 1]
    pub uptime: f64,
    /// Last observed latency in milliseconds
    pub latency_ms: f64,
    /// Successful operations (lookups for index nodes)
    pub successful_ops: u64,
    /// Bytes of customer data held (storage nodes)
    pub storage_used_bytes: f64,
    /// Bytes served to clients (retrieval nodes)
    pub bytes_served: f64,
    /// Cache hits observed (retrieval nodes)
    pub cache_hits: u64,
    /// Total requests observed (retrieval nodes)
    pub total_requests: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            uptime: 1.0,
            latency_ms: 0.0,
            successful_ops: 0,
            storage_used_bytes: 0.0,
            bytes_served: 0.0,
            cache_hits: 0,
            total_requests: 0,
        }
    }
}

impl PerformanceMetrics {
    /// Cache hit ratio; 0.0 before any requests are observed
    pub fn cache_hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / self.total_requests as f64
    }
}

/// Normalized work accounting.
///
/// Monotone accumulator: the raw counters are only ever added to, and
/// `total_work_units` is recomputed from them each epoch. Resetting a raw
/// counter mid-run erases work history and is not supported.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorkMetrics {
    /// Cumulative bytes stored (storage nodes)
    pub bytes_stored: f64,
    /// Cumulative bytes read back to clients (retrieval nodes)
    pub bytes_read: f64,
    /// Cumulative index lookups served (index nodes)
    pub indices_served: u64,
    /// Normalized total: GB stored + GB read + indices / 1000
    pub total_work_units: f64,
}

impl WorkMetrics {
    /// Fold one epoch of raw activity into the type-appropriate counter
    /// and recompute the normalized total.
    pub fn accumulate(&mut self, node_type: NodeType, perf: &PerformanceMetrics) {
        match node_type {
            NodeType::Storage => self.bytes_stored += perf.storage_used_bytes,
            NodeType::Retrieval => self.bytes_read += perf.bytes_served,
            NodeType::Index => self.indices_served += perf.successful_ops,
            NodeType::Auditor => {}
        }

        self.total_work_units = self.bytes_stored / 1e9
            + self.bytes_read / 1e9
            + self.indices_served as f64 / 1000.0;
    }
}

/// Static admission requirements per node role
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeRequirements {
    /// Minimum stake to register
    pub min_stake: f64,
    /// Latency SLA in milliseconds (infinite for auditors)
    pub target_ttfb_ms: f64,
    /// Minimum smoothed uptime
    pub min_availability: f64,
    /// Bandwidth floor in Gbps
    pub min_bandwidth_gbps: f64,
    /// Storage capacity floor in TB
    pub storage_capacity_tb: f64,
}

impl NodeRequirements {
    /// Admission table per role
    pub fn for_type(node_type: NodeType) -> Self {
        let (min_stake, target_ttfb_ms, min_availability) = match node_type {
            NodeType::Storage => (100_000.0, 150.0, 0.999),
            NodeType::Retrieval => (75_000.0, 70.0, 0.999),
            NodeType::Index => (50_000.0, 100.0, 0.999),
            NodeType::Auditor => (25_000.0, f64::INFINITY, 0.99),
        };

        Self {
            min_stake,
            target_ttfb_ms,
            min_availability,
            min_bandwidth_gbps: 1.0,
            storage_capacity_tb: 10.0,
        }
    }
}

/// A registered network node
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    /// Node identifier
    pub id: NodeId,
    /// Node role
    pub node_type: NodeType,
    /// Bonded stake; reduced by slashing, may go negative under heavy penalties
    pub stake: f64,
    /// Reputation in [0, 1], recomputed every epoch
    pub reputation: f64,
    /// Cumulative rewards earned
    pub rewards: f64,
    /// Sticky slash flag; never auto-clears
    pub slashed: bool,
    /// Raw performance counters
    pub performance: PerformanceMetrics,
    /// Normalized work accounting
    pub work: WorkMetrics,
}

impl Node {
    /// Create a node with full reputation and empty counters
    pub fn new(id: NodeId, node_type: NodeType, stake: f64) -> Self {
        Self {
            id,
            node_type,
            stake,
            reputation: 1.0,
            rewards: 0.0,
            slashed: false,
            performance: PerformanceMetrics::default(),
            work: WorkMetrics::default(),
        }
    }

    /// Fold one epoch of observed behavior into the performance counters.
    ///
    /// Uptime is exponentially smoothed toward the drawn success rate;
    /// latency is overwritten. Retrieval nodes additionally sample a
    /// cache-hit window from the injected source.
    pub fn update_performance(
        &mut self,
        success_rate: f64,
        latency_ms: f64,
        rng: &mut dyn RandomSource,
    ) {
        self.performance.uptime =
            self.performance.uptime * UPTIME_DECAY + (1.0 - UPTIME_DECAY) * success_rate;
        self.performance.latency_ms = latency_ms;

        if self.node_type == NodeType::Retrieval {
            self.performance.cache_hits += rng.uniform_u64(CACHE_WINDOW_REQUESTS);
            self.performance.total_requests += CACHE_WINDOW_REQUESTS;
        }
    }

    /// Fold this epoch's raw activity into the work accumulator.
    ///
    /// `epoch_duration_secs` is carried for forward compatibility with
    /// rate-based accounting; the counters themselves are duration-free.
    pub fn update_work(&mut self, _epoch_duration_secs: u64) {
        self.work.accumulate(self.node_type, &self.performance);
    }
}
