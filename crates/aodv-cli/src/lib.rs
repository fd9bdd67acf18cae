//! AODV simulator driver.
//!
//! Composes a run from configuration: generate a connected topology, seed the
//! routing tables, discover a route, print the tables and write a Graphviz
//! rendering with the route highlighted. A configured node failure is then
//! simulated and repaired.

pub mod config;
pub mod logging;
pub mod report;
pub mod simulation;
pub mod visualize;

pub use config::SimConfig;
pub use simulation::{run, RunSummary, Simulation};
