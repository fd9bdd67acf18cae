//! Randomized initial tables.
//!
//! Seeding gives every node a record for every other node so a simulation
//! starts from a populated state. The next hop is a random neighbor while
//! the hop count and distance are the true shortest-path lengths, so a seeded
//! record is generally not a consistent route. Records are labeled
//! [`RouteOrigin::Seeded`] to keep them apart from discovered ones.

use aodv_core::Topology;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::RoutingError;
use crate::table::{RouteOrigin, RouteRecord, RoutingTables};

/// Fill `tables` with a seeded record for every ordered pair of distinct
/// nodes. Nodes without neighbors are skipped. Returns the number of records
/// written.
///
/// Fails with [`RoutingError::Unreachable`] if the topology is not connected.
pub fn seed<T, R>(topology: &T, tables: &RoutingTables, rng: &mut R) -> Result<usize, RoutingError>
where
    T: Topology + ?Sized,
    R: Rng + ?Sized,
{
    let nodes = topology.nodes();
    let mut written = 0;

    for &node in &nodes {
        let neighbors = topology.neighbors(node)?;
        if neighbors.is_empty() {
            tracing::debug!(%node, "isolated node left unseeded");
            continue;
        }

        for &destination in nodes.iter().filter(|&&d| d != node) {
            let Some(&next_hop) = neighbors.choose(rng) else {
                continue;
            };
            let hop_count = topology.hop_distance(node, destination)?;
            let distance = topology.weighted_distance(node, destination)?;

            tables.install(
                node,
                RouteRecord {
                    destination,
                    next_hop,
                    hop_count,
                    distance,
                    origin: RouteOrigin::Seeded,
                },
            );
            written += 1;
        }
    }

    tracing::info!(records = written, nodes = nodes.len(), "seeded routing tables");
    Ok(written)
}
