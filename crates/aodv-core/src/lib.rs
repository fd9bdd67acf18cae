//! AODV Core — network model shared by the routing simulator.
//!
//! This crate provides:
//! - [`NodeId`], [`Edge`] and [`Metric`] — identifiers and link descriptions.
//! - [`Topology`] — the provider interface routing code queries and mutates.
//! - [`Graph`] — an undirected weighted graph implementing [`Topology`], with
//!   ring/star/path builders and seeded random connected generation.
//! - [`TopologyConfig`] — parameters for random topology generation.

pub mod config;
pub mod error;
pub mod graph;
pub mod topology;
pub mod types;

pub use config::TopologyConfig;
pub use error::TopologyError;
pub use graph::Graph;
pub use topology::Topology;
pub use types::{Edge, Metric, NodeId, Weight};
