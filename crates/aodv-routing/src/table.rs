use std::collections::BTreeMap;

use aodv_core::{NodeId, Topology, Weight};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// How a route record entered the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteOrigin {
    /// Placed by the randomized initial seeding pass. Its next hop is an
    /// arbitrary neighbor and need not lie on a shortest path.
    Seeded,
    /// Learned from route discovery or repair.
    Discovered,
}

/// The best known route from an owning node to one destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// The destination this record reaches.
    pub destination: NodeId,
    /// Direct neighbor of the owner to forward traffic to.
    pub next_hop: NodeId,
    /// Recorded path length. Discovered records count one more than the
    /// number of edges; seeded records count edges exactly.
    pub hop_count: u32,
    /// Weighted shortest-path cost from the owner to `destination` when the
    /// record was computed. Not derived from `next_hop` or `hop_count`.
    pub distance: Weight,
    /// Whether the record was seeded or discovered.
    pub origin: RouteOrigin,
}

impl RouteRecord {
    /// Returns true if this candidate should replace `existing`.
    ///
    /// Only a strictly smaller hop count wins; ties and distance differences
    /// never trigger replacement.
    pub fn improves_on(&self, existing: &RouteRecord) -> bool {
        existing.hop_count > self.hop_count
    }
}

/// Which end of a path a route update points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDirection {
    /// `path` runs from `next_node` to the destination (its last node).
    Forward,
    /// `path` runs from the destination (its first node) to the updating
    /// node, as accumulated by a route request travelling outward.
    Reverse,
}

/// Sorted, owned copy of every routing table, suitable for display or
/// serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub tables: BTreeMap<NodeId, Vec<RouteRecord>>,
}

impl TableSnapshot {
    /// Number of records across all nodes.
    pub fn record_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }
}

/// Per-node routing tables: node -> destination -> record.
///
/// Rows are stored in a DashMap so that updates take `&self`; each row is an
/// ordered map so listings come out sorted by destination.
pub struct RoutingTables {
    rows: DashMap<NodeId, BTreeMap<NodeId, RouteRecord>>,
}

impl RoutingTables {
    /// Create a new, empty set of tables.
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    /// Create one empty table per node of `topology`.
    pub fn for_topology<T: Topology + ?Sized>(topology: &T) -> Self {
        let tables = Self::new();
        for node in topology.nodes() {
            tables.rows.insert(node, BTreeMap::new());
        }
        tables
    }

    /// Unconditionally store `record` at `owner`, returning the previous
    /// record for the same destination. Records for the owner itself are
    /// rejected and `None` is returned.
    pub fn install(&self, owner: NodeId, record: RouteRecord) -> Option<RouteRecord> {
        if record.destination == owner {
            return None;
        }
        self.rows
            .entry(owner)
            .or_default()
            .insert(record.destination, record)
    }

    /// Store `record` at `owner` if it improves on the current one. Returns
    /// true if the record was installed.
    pub fn offer(&self, owner: NodeId, record: RouteRecord) -> bool {
        if record.destination == owner {
            return false;
        }
        let mut row = self.rows.entry(owner).or_default();
        let admit = row
            .get(&record.destination)
            .map_or(true, |existing| record.improves_on(existing));
        if admit {
            row.insert(record.destination, record);
        }
        admit
    }

    /// Offer the route implied by `path` to `current` via `next`.
    ///
    /// With [`PathDirection::Reverse`] the destination is `path[0]` and the
    /// hop count is `path.len()`; with [`PathDirection::Forward`] the
    /// destination is the last node and the hop count is `path.len() + 1`.
    /// The distance is the weighted shortest path between `current` and the
    /// destination in `topology`, whatever `path` itself costs.
    pub fn update<T: Topology + ?Sized>(
        &self,
        topology: &T,
        current: NodeId,
        next: NodeId,
        path: &[NodeId],
        direction: PathDirection,
    ) -> Result<bool, RoutingError> {
        let (destination, hop_count) = match (direction, path) {
            (_, []) => return Ok(false),
            (PathDirection::Reverse, [first, ..]) => (*first, path.len() as u32),
            (PathDirection::Forward, [.., last]) => (*last, path.len() as u32 + 1),
        };
        if destination == current {
            return Ok(false);
        }

        let distance = topology.weighted_distance(current, destination)?;
        let installed = self.offer(
            current,
            RouteRecord {
                destination,
                next_hop: next,
                hop_count,
                distance,
                origin: RouteOrigin::Discovered,
            },
        );
        if installed {
            tracing::trace!(
                node = %current,
                %destination,
                next_hop = %next,
                hop_count,
                distance,
                "route installed"
            );
        }
        Ok(installed)
    }

    /// The record `owner` holds for `destination`.
    pub fn get(&self, owner: NodeId, destination: NodeId) -> Option<RouteRecord> {
        self.rows
            .get(&owner)
            .and_then(|row| row.get(&destination).cloned())
    }

    /// Every record held by `owner`, sorted by destination.
    pub fn routes_of(&self, owner: NodeId) -> Vec<RouteRecord> {
        self.rows
            .get(&owner)
            .map(|row| row.values().cloned().collect())
            .unwrap_or_default()
    }

    /// All `(owner, destination)` pairs whose record forwards through
    /// `next_hop`, sorted.
    pub fn entries_via(&self, next_hop: NodeId) -> Vec<(NodeId, NodeId)> {
        let mut pairs: Vec<(NodeId, NodeId)> = self
            .rows
            .iter()
            .flat_map(|row| {
                let owner = *row.key();
                row.value()
                    .values()
                    .filter(|record| record.next_hop == next_hop)
                    .map(|record| (owner, record.destination))
                    .collect::<Vec<_>>()
            })
            .collect();
        pairs.sort();
        pairs
    }

    /// Remove the record `owner` holds for `destination`.
    pub fn invalidate(&self, owner: NodeId, destination: NodeId) -> Option<RouteRecord> {
        self.rows
            .get_mut(&owner)
            .and_then(|mut row| row.remove(&destination))
    }

    /// Nodes that own a table (possibly empty), sorted.
    pub fn owners(&self) -> Vec<NodeId> {
        let mut owners: Vec<NodeId> = self.rows.iter().map(|row| *row.key()).collect();
        owners.sort();
        owners
    }

    /// Total number of records across all nodes.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.value().len()).sum()
    }

    /// Returns `true` if no node holds any record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of every non-empty table.
    pub fn snapshot(&self) -> TableSnapshot {
        let tables: BTreeMap<NodeId, Vec<RouteRecord>> = self
            .rows
            .iter()
            .filter(|row| !row.value().is_empty())
            .map(|row| (*row.key(), row.value().values().cloned().collect()))
            .collect();
        TableSnapshot { tables }
    }
}

impl Default for RoutingTables {
    fn default() -> Self {
        Self::new()
    }
}
