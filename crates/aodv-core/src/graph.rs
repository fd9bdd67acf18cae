use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TopologyConfig;
use crate::error::TopologyError;
use crate::topology::Topology;
use crate::types::{Edge, Metric, NodeId, Weight};

/// An undirected weighted graph stored as ordered adjacency maps.
///
/// Ordered maps keep neighbor iteration deterministic, which the breadth-first
/// route discovery relies on for reproducible results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, Weight>>,
}

/// Internal entry of the Dijkstra priority queue.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: Weight,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cost.to_bits() == other.cost.to_bits() && self.node == other.node
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the cheapest entry pops first.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with nodes `0..count` and no links.
    pub fn with_nodes(count: u32) -> Self {
        let mut graph = Self::new();
        for raw in 0..count {
            graph.add_node(NodeId(raw));
        }
        graph
    }

    /// Ring `0-1-…-(n-1)-0` with unit weights.
    pub fn ring(count: u32) -> Result<Self, TopologyError> {
        if count < 3 {
            return Err(TopologyError::InvalidParameter(format!(
                "a ring needs at least 3 nodes, got {count}"
            )));
        }
        let mut graph = Self::with_nodes(count);
        for raw in 0..count {
            graph.add_edge(NodeId(raw), NodeId((raw + 1) % count), 1.0)?;
        }
        Ok(graph)
    }

    /// Star with center `0` and leaves `1..count`, unit weights.
    pub fn star(count: u32) -> Result<Self, TopologyError> {
        if count < 2 {
            return Err(TopologyError::InvalidParameter(format!(
                "a star needs at least 2 nodes, got {count}"
            )));
        }
        let mut graph = Self::with_nodes(count);
        for raw in 1..count {
            graph.add_edge(NodeId(0), NodeId(raw), 1.0)?;
        }
        Ok(graph)
    }

    /// Line `0-1-…-(n-1)` with unit weights.
    pub fn path(count: u32) -> Result<Self, TopologyError> {
        if count == 0 {
            return Err(TopologyError::InvalidParameter(
                "a path needs at least 1 node".into(),
            ));
        }
        let mut graph = Self::with_nodes(count);
        for raw in 1..count {
            graph.add_edge(NodeId(raw - 1), NodeId(raw), 1.0)?;
        }
        Ok(graph)
    }

    /// Draw Erdős–Rényi graphs `G(n, p)` with uniform link weights until one
    /// is connected.
    pub fn random_connected<R: Rng + ?Sized>(
        config: &TopologyConfig,
        rng: &mut R,
    ) -> Result<Self, TopologyError> {
        config.validate()?;

        for attempt in 1..=config.max_attempts {
            let graph = Self::random(config, rng)?;
            if graph.is_connected() {
                tracing::debug!(
                    attempt,
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    "generated connected topology"
                );
                return Ok(graph);
            }
        }

        Err(TopologyError::GenerationExhausted {
            attempts: config.max_attempts,
        })
    }

    fn random<R: Rng + ?Sized>(
        config: &TopologyConfig,
        rng: &mut R,
    ) -> Result<Self, TopologyError> {
        let mut graph = Self::with_nodes(config.nodes);
        for a in 0..config.nodes {
            for b in (a + 1)..config.nodes {
                if rng.gen_bool(config.edge_probability) {
                    let weight = rng.gen_range(config.min_weight..=config.max_weight);
                    graph.add_edge(NodeId(a), NodeId(b), weight)?;
                }
            }
        }
        Ok(graph)
    }

    /// Insert an isolated node. Returns false if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeMap::new());
        true
    }

    /// Link `a` and `b`, inserting either endpoint if missing. An existing
    /// link between them is overwritten with the new weight.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: Weight) -> Result<(), TopologyError> {
        if a == b {
            return Err(TopologyError::InvalidParameter(format!(
                "self loop on node {a}"
            )));
        }
        if !(weight >= 0.0) || !weight.is_finite() {
            return Err(TopologyError::InvalidParameter(format!(
                "link weight must be finite and non-negative, got {weight}"
            )));
        }
        self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
        Ok(())
    }

    /// Weight of the link between `a` and `b`, if they are adjacent.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<Weight> {
        self.adjacency.get(&a).and_then(|links| links.get(&b)).copied()
    }

    /// Number of member nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected links.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    /// Every undirected link once, with `a < b`, in ascending order.
    pub fn edges(&self) -> Vec<Edge> {
        self.adjacency
            .iter()
            .flat_map(|(&a, links)| {
                links
                    .iter()
                    .filter(move |&(&b, _)| a < b)
                    .map(move |(&b, &weight)| Edge { a, b, weight })
            })
            .collect()
    }

    /// Returns true if every node is reachable from every other node.
    /// The empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.adjacency.keys().next() else {
            return false;
        };
        self.hop_distances_from(start).len() == self.adjacency.len()
    }

    fn require(&self, node: NodeId) -> Result<&BTreeMap<NodeId, Weight>, TopologyError> {
        self.adjacency
            .get(&node)
            .ok_or(TopologyError::UnknownNode(node))
    }

    /// Breadth-first hop distances from `start` to every reachable node.
    fn hop_distances_from(&self, start: NodeId) -> HashMap<NodeId, u32> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start, 0);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let here = dist[&node];
            if let Some(links) = self.adjacency.get(&node) {
                for &next in links.keys() {
                    if !dist.contains_key(&next) {
                        dist.insert(next, here + 1);
                        queue.push_back(next);
                    }
                }
            }
        }
        dist
    }

    fn hop_length(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.hop_distances_from(from).get(&to).copied()
    }

    /// Dijkstra over link weights.
    fn weighted_length(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        let mut best: HashMap<NodeId, Weight> = HashMap::new();
        let mut settled: HashSet<NodeId> = HashSet::new();
        let mut heap = BinaryHeap::new();

        best.insert(from, 0.0);
        heap.push(Frontier {
            cost: 0.0,
            node: from,
        });

        while let Some(Frontier { cost, node }) = heap.pop() {
            if node == to {
                return Some(cost);
            }
            if !settled.insert(node) {
                continue;
            }
            let Some(links) = self.adjacency.get(&node) else {
                continue;
            };
            for (&next, &weight) in links {
                if settled.contains(&next) {
                    continue;
                }
                let candidate = cost + weight;
                let improves = best.get(&next).map_or(true, |&known| candidate < known);
                if improves {
                    best.insert(next, candidate);
                    heap.push(Frontier {
                        cost: candidate,
                        node: next,
                    });
                }
            }
        }
        None
    }
}

impl Topology for Graph {
    fn nodes(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, TopologyError> {
        Ok(self.require(node)?.keys().copied().collect())
    }

    fn remove_node(&mut self, node: NodeId) -> Result<(), TopologyError> {
        let links = self
            .adjacency
            .remove(&node)
            .ok_or(TopologyError::UnknownNode(node))?;
        for peer in links.keys() {
            if let Some(peer_links) = self.adjacency.get_mut(peer) {
                peer_links.remove(&node);
            }
        }
        tracing::debug!(%node, dropped_links = links.len(), "removed node from topology");
        Ok(())
    }

    fn shortest_path_length(
        &self,
        from: NodeId,
        to: NodeId,
        metric: Metric,
    ) -> Result<Weight, TopologyError> {
        self.require(from)?;
        self.require(to)?;

        let length = match metric {
            Metric::Hops => self.hop_length(from, to).map(Weight::from),
            Metric::Weighted => self.weighted_length(from, to),
        };
        length.ok_or(TopologyError::Unreachable { from, to, metric })
    }
}
