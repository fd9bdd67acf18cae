//! Integration test: route discovery over small well-known topologies.

use aodv_core::{Graph, NodeId, Topology, TopologyConfig};
use aodv_integration_tests::{fresh, nodes, seeded};
use aodv_routing::{Discovery, RouteDiscovery, RoutingError};
use rand::rngs::StdRng;
use rand::SeedableRng;

// =========================================================================
// Ring 0-1-2-3-4-0
// =========================================================================

#[test]
fn test_ring_discovery_returns_a_two_hop_route() {
    let (ring, tables) = seeded(Graph::ring(5).unwrap(), 1);
    let report = RouteDiscovery::with_defaults()
        .discover(&ring, &tables, NodeId(0), NodeId(2))
        .expect("both endpoints exist");

    let path = report.outcome.into_path();
    assert!(
        path.nodes() == nodes(&[0, 1, 2]) || path.nodes() == nodes(&[0, 4, 3, 2]),
        "unexpected path {path}"
    );
    assert_eq!(path.hop_count(), 2);
}

#[test]
fn test_ring_without_destination_is_invalid_endpoint() {
    let (mut ring, tables) = seeded(Graph::ring(5).unwrap(), 1);
    ring.remove_node(NodeId(2)).unwrap();
    assert_eq!(ring.node_count(), 4);

    let result = RouteDiscovery::with_defaults().discover(&ring, &tables, NodeId(0), NodeId(2));
    assert_eq!(
        result.unwrap_err(),
        RoutingError::InvalidEndpoint { node: NodeId(2) }
    );
}

// =========================================================================
// Star with center 0
// =========================================================================

#[test]
fn test_star_route_ignores_table_seeding() {
    for seed in 0..8 {
        let (star, tables) = seeded(Graph::star(5).unwrap(), seed);
        let report = RouteDiscovery::with_defaults()
            .discover(&star, &tables, NodeId(1), NodeId(4))
            .unwrap();

        let path = report.outcome.into_path();
        assert_eq!(path.nodes(), nodes(&[1, 0, 4]).as_slice(), "seed {seed}");
        assert_eq!(path.hop_count(), 2);
    }

    let (star, tables) = fresh(Graph::star(5).unwrap());
    let report = RouteDiscovery::with_defaults()
        .discover(&star, &tables, NodeId(1), NodeId(4))
        .unwrap();
    assert_eq!(report.outcome.into_path().nodes(), nodes(&[1, 0, 4]).as_slice());
}

// =========================================================================
// Random topologies
// =========================================================================

#[test]
fn test_random_topologies_yield_minimum_hop_routes() {
    let config = TopologyConfig {
        nodes: 15,
        edge_probability: 0.25,
        ..TopologyConfig::default()
    };

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let graph = Graph::random_connected(&config, &mut rng).unwrap();
        let (graph, tables) = seeded(graph, seed);
        let engine = RouteDiscovery::with_defaults();

        for dst in 1..config.nodes {
            let (src, dst) = (NodeId(0), NodeId(dst));
            let report = engine.discover(&graph, &tables, src, dst).unwrap();
            let Discovery::Found(path) = report.outcome else {
                panic!("connected topology, seed {seed}: {src} -> {dst} not found");
            };
            assert_eq!(path.hop_count() as u32, graph.hop_distance(src, dst).unwrap());
            assert!(path.is_valid_in(&graph));
        }
    }
}

#[test]
fn test_disconnected_destination_is_not_an_error() {
    let mut graph = Graph::ring(4).unwrap();
    graph.add_node(NodeId(9));
    let (graph, tables) = fresh(graph);

    let report = RouteDiscovery::with_defaults()
        .discover(&graph, &tables, NodeId(0), NodeId(9))
        .unwrap();
    assert_eq!(report.outcome, Discovery::Unreachable);
    // All four ring nodes were flooded.
    assert_eq!(report.nodes_reached, 4);
}
