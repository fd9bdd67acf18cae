//! Integration test: node failure and local repair across core, routing and
//! the simulation driver.

use aodv_core::{Graph, NodeId, Topology};
use aodv_integration_tests::{fresh, nodes, seeded, A, B, C};
use aodv_routing::{RepairCoordinator, RouteDiscovery, RoutingError};

// =========================================================================
// Relay line a - b - c
// =========================================================================

#[test]
fn test_failed_relay_leaves_stale_route() {
    let (mut line, tables) = seeded(Graph::path(3).unwrap(), 5);
    assert_eq!(tables.get(A, C).unwrap().next_hop, B);
    assert_eq!(tables.entries_via(B), vec![(A, B), (A, C), (C, A), (C, B)]);

    let report = RepairCoordinator::with_defaults()
        .repair(&mut line, &tables, B)
        .expect("b exists");

    assert!(!line.contains(B));
    assert!(report.repaired.is_empty());
    assert_eq!(report.stale, vec![(A, C), (C, A)]);
    assert_eq!(report.skipped, vec![(A, B), (C, B)]);
    assert!(report.failures.is_empty());

    // No alternate route, so the entry through the dead relay survives.
    let record = tables.get(A, C).unwrap();
    assert_eq!(record.next_hop, B);
    assert_eq!(record.hop_count, 2);
}

#[test]
fn test_repairing_a_missing_node_is_invalid_endpoint() {
    let (mut line, tables) = seeded(Graph::path(3).unwrap(), 5);
    let result = RepairCoordinator::with_defaults().repair(&mut line, &tables, NodeId(7));
    assert_eq!(
        result.unwrap_err(),
        RoutingError::InvalidEndpoint { node: NodeId(7) }
    );
    assert_eq!(line.node_count(), 3);
}

// =========================================================================
// Ring 0-1-2-3-4-5-0
// =========================================================================

#[test]
fn test_ring_routes_move_off_failed_node() {
    for seed in 0..10 {
        let (mut ring, tables) = seeded(Graph::ring(6).unwrap(), seed);
        let failed = NodeId(1);
        let report = RepairCoordinator::with_defaults()
            .repair(&mut ring, &tables, failed)
            .unwrap();

        assert!(report.stale.is_empty(), "seed {seed}: ring minus one stays connected");
        assert!(report.failures.is_empty(), "seed {seed}: {:?}", report.failures);

        for route in &report.repaired {
            assert!(!route.path.nodes().contains(&failed));
            assert!(route.path.is_valid_in(&ring));
            assert_eq!(
                tables.get(route.source, route.destination).unwrap().next_hop,
                route.path.nodes()[1]
            );
        }

        for owner in ring.nodes() {
            for record in tables.routes_of(owner) {
                if record.destination != failed {
                    assert_ne!(
                        record.next_hop, failed,
                        "seed {seed}: {owner} -> {} still via {failed}",
                        record.destination
                    );
                }
            }
        }
    }
}

#[test]
fn test_rediscovery_after_failure_routes_the_long_way() {
    let (mut ring, tables) = fresh(Graph::ring(5).unwrap());
    let engine = RouteDiscovery::with_defaults();

    ring.remove_node(NodeId(1)).unwrap();
    let report = engine.discover(&ring, &tables, NodeId(0), NodeId(2)).unwrap();
    assert_eq!(
        report.outcome.into_path().nodes(),
        nodes(&[0, 4, 3, 2]).as_slice()
    );
}

// =========================================================================
// Full driver
// =========================================================================

#[test]
fn test_driver_run_with_failure_serializes() {
    let mut config = aodv_cli::SimConfig::default();
    config.topology.nodes = 10;
    config.topology.edge_probability = 0.35;
    config.topology.seed = 3;
    config.discovery.destination = 9;
    config.failure.node = Some(4);

    let (sim, summary) = aodv_cli::run(&config).expect("valid configuration");
    assert!(!sim.graph().contains(NodeId(4)));
    assert_eq!(summary.path.source(), Some(NodeId(0)));
    assert_eq!(summary.path.destination(), Some(NodeId(9)));

    let repair = summary.repair.as_ref().expect("node 4 existed");
    assert_eq!(repair.failed_node, Some(NodeId(4)));

    let dot = aodv_cli::visualize::to_dot(sim.graph(), &summary.path);
    assert!(dot.starts_with("graph aodv {"));
    assert!(!dot.contains("    4;"));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["source"], 0);
    assert_eq!(json["destination"], 9);
    assert!(json["cost"].as_f64().unwrap() >= 1.0);
    assert!(json["tables"].is_object());
    tracing::debug!(records = summary.tables.record_count(), "driver run checked");
}
