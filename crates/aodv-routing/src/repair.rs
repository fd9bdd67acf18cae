use aodv_core::{NodeId, Topology};
use serde::{Serialize, Serializer};

use crate::discovery::{Discovery, RouteDiscovery};
use crate::error::RoutingError;
use crate::route::Path;
use crate::table::{PathDirection, RoutingTables};

/// A broken route that was rediscovered around the failed node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairedRoute {
    pub source: NodeId,
    pub destination: NodeId,
    pub path: Path,
}

/// Outcome of a repair sweep after a node failure.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairReport {
    pub failed_node: Option<NodeId>,
    /// Routes rediscovered and reinstalled.
    pub repaired: Vec<RepairedRoute>,
    /// Routes with no alternate path; their records were left in place.
    pub stale: Vec<(NodeId, NodeId)>,
    /// Routes to the failed node itself, not attempted.
    pub skipped: Vec<(NodeId, NodeId)>,
    /// Routes that an earlier rediscovery in the same sweep already moved
    /// off the failed node.
    pub superseded: Vec<(NodeId, NodeId)>,
    /// Per-route errors, each a [`RoutingError::RepairAttemptFailed`].
    #[serde(serialize_with = "errors_as_strings")]
    pub failures: Vec<RoutingError>,
}

fn errors_as_strings<S>(errors: &[RoutingError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

impl RepairReport {
    /// Number of routes that pointed through the failed node.
    pub fn affected(&self) -> usize {
        self.repaired.len()
            + self.stale.len()
            + self.skipped.len()
            + self.superseded.len()
            + self.failures.len()
    }
}

enum PairOutcome {
    Repaired(Path),
    Stale,
    Superseded,
}

/// Local repair: after a node fails, rediscover every route that used it as
/// next hop.
pub struct RepairCoordinator {
    discovery: RouteDiscovery,
}

impl RepairCoordinator {
    pub fn new(discovery: RouteDiscovery) -> Self {
        Self { discovery }
    }

    pub fn with_defaults() -> Self {
        Self {
            discovery: RouteDiscovery::with_defaults(),
        }
    }

    /// Remove `failed` from `topology` and repair the routes through it.
    ///
    /// Affected routes are handled one at a time in `(source, destination)`
    /// order. A route with no alternate path keeps its stale record. An error
    /// on one route is logged and recorded without stopping the sweep.
    pub fn repair<T: Topology + ?Sized>(
        &self,
        topology: &mut T,
        tables: &RoutingTables,
        failed: NodeId,
    ) -> Result<RepairReport, RoutingError> {
        topology
            .remove_node(failed)
            .map_err(|_| RoutingError::InvalidEndpoint { node: failed })?;

        let affected = tables.entries_via(failed);
        tracing::info!(node = %failed, affected = affected.len(), "node failed, repairing routes");

        let mut report = RepairReport {
            failed_node: Some(failed),
            ..RepairReport::default()
        };

        for (source, destination) in affected {
            if destination == failed {
                report.skipped.push((source, destination));
                continue;
            }

            match self.repair_pair(&*topology, tables, failed, source, destination) {
                Ok(PairOutcome::Repaired(path)) => {
                    tracing::info!(%source, %destination, %path, "updated route after failure");
                    report.repaired.push(RepairedRoute {
                        source,
                        destination,
                        path,
                    });
                }
                Ok(PairOutcome::Stale) => {
                    tracing::debug!(%source, %destination, "no alternate route, keeping stale entry");
                    report.stale.push((source, destination));
                }
                Ok(PairOutcome::Superseded) => report.superseded.push((source, destination)),
                Err(e) => {
                    tracing::warn!(%source, %destination, error = %e, "failed to update route after failure");
                    report.failures.push(RoutingError::RepairAttemptFailed {
                        source_node: source,
                        destination,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    fn repair_pair<T: Topology + ?Sized>(
        &self,
        topology: &T,
        tables: &RoutingTables,
        failed: NodeId,
        source: NodeId,
        destination: NodeId,
    ) -> Result<PairOutcome, RoutingError> {
        let still_broken = tables
            .get(source, destination)
            .is_some_and(|record| record.next_hop == failed);
        if !still_broken {
            return Ok(PairOutcome::Superseded);
        }

        let report = self.discovery.discover(topology, tables, source, destination)?;
        let path = match report.outcome {
            Discovery::Found(path) => path,
            Discovery::Unreachable => return Ok(PairOutcome::Stale),
        };
        let &[_, next_hop, ..] = path.nodes() else {
            return Ok(PairOutcome::Stale);
        };

        // The old record points at a node that no longer exists, so the
        // improvement rule is applied against an empty slot.
        let broken = tables.invalidate(source, destination);
        let installed = tables.update(
            topology,
            source,
            next_hop,
            &path.nodes()[1..],
            PathDirection::Forward,
        );
        if let (Err(_), Some(record)) = (&installed, broken) {
            tables.install(source, record);
        }
        installed?;

        Ok(PairOutcome::Repaired(path))
    }
}
