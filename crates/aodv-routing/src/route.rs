use std::fmt;

use aodv_core::{NodeId, Topology, Weight};
use serde::{Deserialize, Serialize};

/// An ordered sequence of distinct nodes from a source to a destination,
/// both inclusive. The empty path means "no route".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    /// Create a path from its node sequence.
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// The path that denotes a failed discovery.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The ordered nodes.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges traversed; zero for empty and single-node paths.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Consecutive node pairs, i.e. the links this path uses.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Returns true if `a` and `b` are consecutive on this path, in either order.
    pub fn uses_link(&self, a: NodeId, b: NodeId) -> bool {
        self.edges().any(|(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Returns true if every consecutive pair is adjacent in `topology` and
    /// no node repeats.
    pub fn is_valid_in<T: Topology + ?Sized>(&self, topology: &T) -> bool {
        let mut seen = std::collections::HashSet::new();
        if !self.nodes.iter().all(|n| topology.contains(*n) && seen.insert(*n)) {
            return false;
        }
        self.edges().all(|(a, b)| {
            topology
                .neighbors(a)
                .map(|neighbors| neighbors.contains(&b))
                .unwrap_or(false)
        })
    }

    /// Sum of link weights along the path, given a weight lookup.
    ///
    /// Returns `None` if any consecutive pair has no link.
    pub fn total_weight<F>(&self, weight: F) -> Option<Weight>
    where
        F: Fn(NodeId, NodeId) -> Option<Weight>,
    {
        self.edges().map(|(a, b)| weight(a, b)).sum()
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::new(nodes)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aodv_core::Graph;

    fn path(raw: &[u32]) -> Path {
        raw.iter().copied().map(NodeId).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_empty_path() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.hop_count(), 0);
        assert_eq!(p.source(), None);
        assert_eq!(p.edges().count(), 0);
        assert_eq!(p.to_string(), "[]");
    }

    #[test]
    fn test_hop_count_and_endpoints() {
        let p = path(&[0, 4, 3, 2]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.hop_count(), 3);
        assert_eq!(p.source(), Some(NodeId(0)));
        assert_eq!(p.destination(), Some(NodeId(2)));
        assert_eq!(p.to_string(), "[0 -> 4 -> 3 -> 2]");
    }

    #[test]
    fn test_uses_link_is_undirected() {
        let p = path(&[1, 0, 4]);
        assert!(p.uses_link(NodeId(0), NodeId(1)));
        assert!(p.uses_link(NodeId(4), NodeId(0)));
        assert!(!p.uses_link(NodeId(1), NodeId(4)));
    }

    #[test]
    fn test_validity_against_topology() {
        let ring = Graph::ring(5).unwrap();
        assert!(path(&[0, 1, 2]).is_valid_in(&ring));
        assert!(!path(&[0, 2]).is_valid_in(&ring));
        assert!(!path(&[0, 1, 0]).is_valid_in(&ring));
        assert!(!path(&[0, 9]).is_valid_in(&ring));
    }

    #[test]
    fn test_total_weight() {
        let ring = Graph::ring(5).unwrap();
        let p = path(&[0, 4, 3]);
        assert_eq!(p.total_weight(|a, b| ring.weight(a, b)), Some(2.0));
        assert_eq!(path(&[0, 2]).total_weight(|a, b| ring.weight(a, b)), None);
    }
}
