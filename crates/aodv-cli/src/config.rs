//! Simulation configuration loading and management.

use aodv_core::TopologyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Full configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimConfig {
    /// Random topology generation.
    #[serde(default)]
    pub topology: TopologyConfig,

    /// Route discovery request.
    #[serde(default)]
    pub discovery: DiscoverySection,

    /// Optional node failure followed by local repair.
    #[serde(default)]
    pub failure: FailureSection,

    /// Report and visualization outputs.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    /// Node that originates the route request.
    #[serde(default)]
    pub source: u32,
    /// Node being searched for.
    #[serde(default = "default_destination")]
    pub destination: u32,
    /// Print every RREQ transmission after discovery.
    #[serde(default = "default_true")]
    pub record_broadcasts: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FailureSection {
    /// Node to fail after the initial discovery, if any.
    #[serde(default)]
    pub node: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where to write the Graphviz rendering of the topology.
    #[serde(default = "default_dot_path")]
    pub dot_path: Option<PathBuf>,
    /// Where to write a JSON snapshot of the final routing tables.
    #[serde(default)]
    pub json_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_destination() -> u32 {
    8
}
fn default_true() -> bool {
    true
}
fn default_dot_path() -> Option<PathBuf> {
    Some(PathBuf::from("aodv.dot"))
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            source: 0,
            destination: default_destination(),
            record_broadcasts: default_true(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dot_path: default_dot_path(),
            json_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SimConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: SimConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check the parts of the configuration that can be checked before a
    /// topology exists.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.topology.validate()?;
        match self.logging.format.as_str() {
            "text" | "json" => Ok(()),
            other => anyhow::bail!("unknown log format {other:?}, expected \"text\" or \"json\""),
        }
    }
}
