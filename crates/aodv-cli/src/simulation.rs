//! A single simulation run: topology, tables and the random source shared by
//! generation and seeding.

use aodv_core::{Graph, NodeId, TopologyError, Weight};
use aodv_routing::{
    seed, Discovery, DiscoveryConfig, Path, RepairCoordinator, RepairReport, RouteDiscovery,
    RouteRequest, RoutingError, RoutingTables, TableSnapshot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::SimConfig;

/// What a driven run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: NodeId,
    pub destination: NodeId,
    /// The discovered path; empty if discovery failed.
    pub path: Path,
    /// Sum of link weights along `path` in the topology it was found in.
    pub cost: Option<Weight>,
    #[serde(skip)]
    pub broadcasts: Vec<RouteRequest>,
    pub repair: Option<RepairReport>,
    pub tables: TableSnapshot,
}

pub struct Simulation {
    graph: Graph,
    tables: RoutingTables,
    rng: StdRng,
    discovery: DiscoveryConfig,
}

impl Simulation {
    /// Start a run over an existing topology with empty tables.
    pub fn new(graph: Graph, seed: u64, discovery: DiscoveryConfig) -> Self {
        let tables = RoutingTables::for_topology(&graph);
        Self {
            graph,
            tables,
            rng: StdRng::seed_from_u64(seed),
            discovery,
        }
    }

    /// Generate a random connected topology from `config`. The same random
    /// source is kept for table seeding.
    pub fn from_config(config: &SimConfig) -> Result<Self, TopologyError> {
        let mut rng = StdRng::seed_from_u64(config.topology.seed);
        let graph = Graph::random_connected(&config.topology, &mut rng)?;
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            seed = config.topology.seed,
            "topology ready"
        );
        let tables = RoutingTables::for_topology(&graph);
        Ok(Self {
            graph,
            tables,
            rng,
            discovery: DiscoveryConfig {
                record_broadcasts: config.discovery.record_broadcasts,
            },
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn tables(&self) -> &RoutingTables {
        &self.tables
    }

    /// Fill the tables with randomized seeded records.
    pub fn seed_tables(&mut self) -> Result<usize, RoutingError> {
        seed(&self.graph, &self.tables, &mut self.rng)
    }

    /// Discover a route, recovering any error as the empty path.
    pub fn discover(&self, source: NodeId, destination: NodeId) -> (Path, Vec<RouteRequest>) {
        tracing::info!(%source, %destination, "initiating AODV route discovery");
        let engine = RouteDiscovery::new(self.discovery.clone());
        match engine.discover(&self.graph, &self.tables, source, destination) {
            Ok(report) => {
                let path = match report.outcome {
                    Discovery::Found(path) => {
                        tracing::info!(%path, hops = path.hop_count(), "AODV route found");
                        path
                    }
                    Discovery::Unreachable => {
                        tracing::info!("AODV route not found");
                        Path::empty()
                    }
                };
                (path, report.broadcasts)
            }
            Err(e) => {
                tracing::warn!(error = %e, "AODV route discovery failed");
                (Path::empty(), Vec::new())
            }
        }
    }

    /// Fail `node` and repair the routes that used it.
    pub fn fail_node(&mut self, node: NodeId) -> Result<RepairReport, RoutingError> {
        let coordinator = RepairCoordinator::new(RouteDiscovery::new(DiscoveryConfig {
            record_broadcasts: false,
        }));
        coordinator.repair(&mut self.graph, &self.tables, node)
    }
}

/// Build, seed, discover, and optionally fail a node, as configured.
pub fn run(config: &SimConfig) -> anyhow::Result<(Simulation, RunSummary)> {
    config.validate()?;
    let mut sim = Simulation::from_config(config)?;
    sim.seed_tables()?;

    let source = NodeId(config.discovery.source);
    let destination = NodeId(config.discovery.destination);
    let (path, broadcasts) = sim.discover(source, destination);
    let cost = if path.is_empty() {
        None
    } else {
        path.total_weight(|a, b| sim.graph().weight(a, b))
    };

    let repair = match config.failure.node {
        Some(raw) => match sim.fail_node(NodeId(raw)) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(node = raw, error = %e, "node failure not simulated");
                None
            }
        },
        None => None,
    };

    let summary = RunSummary {
        source,
        destination,
        path,
        cost,
        broadcasts,
        repair,
        tables: sim.tables().snapshot(),
    };
    Ok((sim, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aodv_core::Topology;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.topology.nodes = 8;
        config.topology.edge_probability = 0.4;
        config.topology.seed = 17;
        config.discovery.destination = 7;
        config
    }

    #[test]
    fn test_run_finds_minimum_hop_route() {
        let (sim, summary) = run(&small_config()).unwrap();
        let expected = sim.graph().hop_distance(NodeId(0), NodeId(7)).unwrap();

        assert_eq!(summary.path.hop_count() as u32, expected);
        assert_eq!(summary.path.source(), Some(NodeId(0)));
        assert!(!summary.broadcasts.is_empty());

        let cost = summary.cost.unwrap();
        let shortest = sim.graph().weighted_distance(NodeId(0), NodeId(7)).unwrap();
        assert!(cost >= shortest - 1e-9);
        assert!(summary.tables.record_count() >= 8 * 7);
    }

    #[test]
    fn test_run_is_reproducible() {
        let (_, a) = run(&small_config()).unwrap();
        let (_, b) = run(&small_config()).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.tables, b.tables);
    }

    #[test]
    fn test_invalid_endpoint_yields_empty_path() {
        let mut config = small_config();
        config.discovery.destination = 99;
        let (_, summary) = run(&config).unwrap();
        assert!(summary.path.is_empty());
        assert!(summary.cost.is_none());
        assert!(summary.broadcasts.is_empty());
    }

    #[test]
    fn test_failure_is_repaired() {
        let mut config = small_config();
        config.failure.node = Some(3);
        let (sim, summary) = run(&config).unwrap();

        assert!(!sim.graph().contains(NodeId(3)));
        let repair = summary.repair.unwrap();
        assert_eq!(repair.failed_node, Some(NodeId(3)));
        assert!(repair.failures.is_empty());
    }

    #[test]
    fn test_infinite_weight_bound_is_rejected_before_generation() {
        let config: SimConfig = toml::from_str("[topology]\nmax_weight = inf\n").unwrap();
        assert!(config.topology.max_weight.is_infinite());
        assert!(config.validate().is_err());
        assert!(run(&config).is_err());

        let config: SimConfig = toml::from_str("[topology]\nmin_weight = nan\n").unwrap();
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_unknown_failed_node_is_reported_not_fatal() {
        let mut config = small_config();
        config.failure.node = Some(42);
        let (_, summary) = run(&config).unwrap();
        assert!(summary.repair.is_none());
    }
}
