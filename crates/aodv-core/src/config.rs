use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Parameters for generating a random connected topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Number of nodes, identified `0..nodes`.
    #[serde(default = "default_nodes")]
    pub nodes: u32,
    /// Probability that any given pair of nodes is linked.
    #[serde(default = "default_edge_probability")]
    pub edge_probability: f64,
    /// Lower bound of the uniform link weight distribution.
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,
    /// Upper bound of the uniform link weight distribution.
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
    /// Seed for the random source shared by generation and table seeding.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// How many graphs to draw before giving up on connectivity.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_nodes() -> u32 {
    10
}
fn default_edge_probability() -> f64 {
    0.3
}
fn default_min_weight() -> f64 {
    1.0
}
fn default_max_weight() -> f64 {
    10.0
}
fn default_seed() -> u64 {
    42
}
fn default_max_attempts() -> u32 {
    1000
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            edge_probability: default_edge_probability(),
            min_weight: default_min_weight(),
            max_weight: default_max_weight(),
            seed: default_seed(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl TopologyConfig {
    /// Validate that all fields are within acceptable ranges.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.nodes == 0 {
            return Err(TopologyError::InvalidParameter(
                "nodes must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(TopologyError::InvalidParameter(format!(
                "edge_probability out of range [0, 1]: {}",
                self.edge_probability
            )));
        }
        if !self.min_weight.is_finite() || !self.max_weight.is_finite() {
            return Err(TopologyError::InvalidParameter(format!(
                "weights must be finite, got [{}, {}]",
                self.min_weight, self.max_weight
            )));
        }
        if self.min_weight < 0.0 || self.max_weight < self.min_weight {
            return Err(TopologyError::InvalidParameter(format!(
                "weight range must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_weight, self.max_weight
            )));
        }
        if self.max_attempts == 0 {
            return Err(TopologyError::InvalidParameter(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
