//! Fixtures shared by the cross-crate scenario tests.

use aodv_core::{Graph, NodeId};
use aodv_routing::RoutingTables;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Named nodes for the three-node relay line `a - b - c`.
pub const A: NodeId = NodeId(0);
pub const B: NodeId = NodeId(1);
pub const C: NodeId = NodeId(2);

/// Node ids from raw indices.
pub fn nodes(raw: &[u32]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId).collect()
}

/// A topology with empty tables.
pub fn fresh(graph: Graph) -> (Graph, RoutingTables) {
    let tables = RoutingTables::for_topology(&graph);
    (graph, tables)
}

/// A topology whose tables went through randomized seeding with `seed`.
pub fn seeded(graph: Graph, seed: u64) -> (Graph, RoutingTables) {
    let tables = RoutingTables::for_topology(&graph);
    aodv_routing::seed(&graph, &tables, &mut StdRng::seed_from_u64(seed))
        .expect("fixture topologies are connected");
    (graph, tables)
}
