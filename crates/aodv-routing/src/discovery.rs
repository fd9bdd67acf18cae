use std::collections::{HashSet, VecDeque};

use aodv_core::{NodeId, Topology};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::route::Path;
use crate::rreq::RouteRequest;
use crate::table::{PathDirection, RoutingTables};

/// Configuration for route discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Keep every RREQ transmission in the returned report.
    pub record_broadcasts: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            record_broadcasts: true,
        }
    }
}

/// Result of a single route discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The first (minimum-hop) path reached by the flood.
    Found(Path),
    /// The flood exhausted without reaching the destination.
    Unreachable,
}

impl Discovery {
    pub fn is_found(&self) -> bool {
        matches!(self, Discovery::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Discovery::Found(path) => Some(path),
            Discovery::Unreachable => None,
        }
    }

    /// The discovered path, or the empty path if none was found.
    pub fn into_path(self) -> Path {
        match self {
            Discovery::Found(path) => path,
            Discovery::Unreachable => Path::empty(),
        }
    }
}

/// Everything a discovery produced besides its table side effects.
#[derive(Debug, Clone)]
pub struct DiscoveryReport {
    pub source: NodeId,
    pub destination: NodeId,
    pub outcome: Discovery,
    /// RREQ transmissions in flood order; empty unless
    /// [`DiscoveryConfig::record_broadcasts`] is set.
    pub broadcasts: Vec<RouteRequest>,
    /// Number of nodes that processed the request, the source included.
    pub nodes_reached: usize,
}

/// Reactive route discovery by flooding route requests breadth-first.
///
/// Every node that relays a request learns a reverse route to the requester,
/// on every explored branch. The flood stops at the first transmission that
/// reaches the destination, which therefore holds a minimum-hop path.
pub struct RouteDiscovery {
    config: DiscoveryConfig,
}

impl RouteDiscovery {
    /// Create a new discovery engine with the given configuration.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Create a discovery engine with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: DiscoveryConfig::default(),
        }
    }

    /// Flood a route request from `source` looking for `destination`,
    /// installing reverse routes in `tables` as it spreads.
    ///
    /// Fails with [`RoutingError::InvalidEndpoint`] if either endpoint is not
    /// in `topology`. An unreachable destination is not an error: the report
    /// carries [`Discovery::Unreachable`].
    pub fn discover<T: Topology + ?Sized>(
        &self,
        topology: &T,
        tables: &RoutingTables,
        source: NodeId,
        destination: NodeId,
    ) -> Result<DiscoveryReport, RoutingError> {
        for node in [source, destination] {
            if !topology.contains(node) {
                return Err(RoutingError::InvalidEndpoint { node });
            }
        }

        let mut report = DiscoveryReport {
            source,
            destination,
            outcome: Discovery::Unreachable,
            broadcasts: Vec::new(),
            nodes_reached: 0,
        };

        if source == destination {
            report.outcome = Discovery::Found(Path::new(vec![source]));
            return Ok(report);
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue: VecDeque<(NodeId, Vec<NodeId>)> = VecDeque::new();
        queue.push_back((source, vec![source]));

        while let Some((node, path)) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            report.nodes_reached += 1;

            let neighbors = topology.neighbors(node)?;

            // A relay learns the way back to the requester through whoever
            // handed it the request.
            if node != source && !neighbors.is_empty() {
                let previous = path[path.len() - 2];
                tables.update(topology, node, previous, &path, PathDirection::Reverse)?;
            }

            for neighbor in neighbors {
                self.broadcast(&mut report, node, neighbor, path.len() - 1);

                if neighbor == destination {
                    let mut found = path.clone();
                    found.push(neighbor);
                    tables.update(topology, neighbor, node, &found, PathDirection::Reverse)?;
                    report.nodes_reached += 1;

                    let found = Path::new(found);
                    tracing::debug!(%source, %destination, path = %found, "route found");
                    report.outcome = Discovery::Found(found);
                    return Ok(report);
                }

                if !visited.contains(&neighbor) {
                    let mut extended = path.clone();
                    extended.push(neighbor);
                    queue.push_back((neighbor, extended));
                }
            }
        }

        tracing::debug!(%source, %destination, "destination unreachable");
        Ok(report)
    }

    fn broadcast(&self, report: &mut DiscoveryReport, from: NodeId, to: NodeId, hops: usize) {
        tracing::debug!(%from, %to, "broadcasting RREQ");
        if self.config.record_broadcasts {
            report.broadcasts.push(RouteRequest {
                origin: report.source,
                target: report.destination,
                from,
                to,
                hops: hops as u32,
            });
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use aodv_core::{Graph, TopologyError};
    use proptest::prelude::*;

    fn arb_graph() -> impl Strategy<Value = Graph> {
        (2u32..12).prop_flat_map(|count| {
            prop::collection::vec((0..count, 0..count, 0.0f64..10.0), 0..30).prop_map(
                move |links| {
                    let mut g = Graph::with_nodes(count);
                    for (a, b, w) in links {
                        if a != b {
                            let _ = g.add_edge(NodeId(a), NodeId(b), w);
                        }
                    }
                    g
                },
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn discovered_paths_are_minimum_hop(
            graph in arb_graph(),
            src in 0u32..12,
            dst in 0u32..12,
        ) {
            let count = graph.node_count() as u32;
            let (src, dst) = (NodeId(src % count), NodeId(dst % count));
            let tables = RoutingTables::for_topology(&graph);

            let report = RouteDiscovery::with_defaults()
                .discover(&graph, &tables, src, dst)
                .unwrap();

            match graph.hop_distance(src, dst) {
                Ok(hops) => {
                    let path = report.outcome.into_path();
                    prop_assert_eq!(path.hop_count() as u32, hops);
                    prop_assert_eq!(path.source(), Some(src));
                    prop_assert_eq!(path.destination(), Some(dst));
                    prop_assert!(path.is_valid_in(&graph));
                }
                Err(TopologyError::Unreachable { .. }) => {
                    prop_assert_eq!(report.outcome, Discovery::Unreachable);
                }
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }

        #[test]
        fn no_node_records_itself(
            graph in arb_graph(),
            src in 0u32..12,
            dst in 0u32..12,
        ) {
            let count = graph.node_count() as u32;
            let tables = RoutingTables::for_topology(&graph);
            RouteDiscovery::with_defaults()
                .discover(&graph, &tables, NodeId(src % count), NodeId(dst % count))
                .unwrap();

            for owner in tables.owners() {
                prop_assert!(tables.get(owner, owner).is_none());
            }
        }
    }
}
