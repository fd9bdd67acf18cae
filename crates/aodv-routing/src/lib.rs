//! AODV Routing — reactive route discovery and local repair.
//!
//! This crate provides:
//! - [`RoutingTables`] — per-node tables of [`RouteRecord`]s with the
//!   hop-count improvement rule.
//! - [`RouteDiscovery`] — breadth-first RREQ flooding that installs reverse
//!   routes and returns the first (minimum-hop) [`Path`] to a destination.
//! - [`RepairCoordinator`] — removes a failed node and rediscovers every
//!   route that used it as next hop.
//! - [`seed()`] — randomized initial tables for demonstration runs.

pub mod discovery;
pub mod error;
pub mod repair;
pub mod route;
pub mod rreq;
pub mod seed;
pub mod table;

// Re-exports for convenience.
pub use discovery::{Discovery, DiscoveryConfig, DiscoveryReport, RouteDiscovery};
pub use error::RoutingError;
pub use repair::{RepairCoordinator, RepairReport, RepairedRoute};
pub use route::Path;
pub use rreq::RouteRequest;
pub use seed::seed;
pub use table::{PathDirection, RouteOrigin, RouteRecord, RoutingTables, TableSnapshot};
