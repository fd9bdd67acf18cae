use crate::error::TopologyError;
use crate::types::{Metric, NodeId, Weight};

/// Provider of the network a routing simulation runs over.
///
/// Routing code only reaches the network through this trait, so any graph
/// representation that can answer these queries can drive discovery and
/// repair.
pub trait Topology {
    /// All member nodes in ascending order.
    fn nodes(&self) -> Vec<NodeId>;

    /// Returns true if `node` is a member of the topology.
    fn contains(&self, node: NodeId) -> bool;

    /// Direct neighbors of `node` in ascending order.
    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, TopologyError>;

    /// Remove `node` together with every incident link.
    fn remove_node(&mut self, node: NodeId) -> Result<(), TopologyError>;

    /// Length of the shortest path between `from` and `to` under `metric`.
    ///
    /// Fails with [`TopologyError::Unreachable`] when no path exists.
    fn shortest_path_length(
        &self,
        from: NodeId,
        to: NodeId,
        metric: Metric,
    ) -> Result<Weight, TopologyError>;

    /// Unweighted shortest-path length in edges.
    fn hop_distance(&self, from: NodeId, to: NodeId) -> Result<u32, TopologyError> {
        self.shortest_path_length(from, to, Metric::Hops)
            .map(|hops| hops as u32)
    }

    /// Weighted shortest-path length.
    fn weighted_distance(&self, from: NodeId, to: NodeId) -> Result<Weight, TopologyError> {
        self.shortest_path_length(from, to, Metric::Weighted)
    }
}
