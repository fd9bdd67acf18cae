//! `aodv-sim run` — Drive a simulation and print its results.

use aodv_cli::{logging, report, simulation, visualize, SimConfig};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the config file.
    #[arg(short, long, default_value = "aodv.toml")]
    pub config: PathBuf,

    /// Override the discovery source node.
    #[arg(long)]
    pub source: Option<u32>,

    /// Override the discovery destination node.
    #[arg(long)]
    pub destination: Option<u32>,

    /// Override the number of nodes.
    #[arg(long)]
    pub nodes: Option<u32>,

    /// Override the random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fail this node after discovery and repair its routes.
    #[arg(long)]
    pub fail: Option<u32>,

    /// Override where the Graphviz rendering is written.
    #[arg(long)]
    pub dot: Option<PathBuf>,

    /// Write a JSON snapshot of the final tables here.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Print every RREQ transmission.
    #[arg(long)]
    pub show_broadcasts: bool,

    /// Override the log level.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl RunArgs {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(source) = self.source {
            config.discovery.source = source;
        }
        if let Some(destination) = self.destination {
            config.discovery.destination = destination;
        }
        if let Some(nodes) = self.nodes {
            config.topology.nodes = nodes;
        }
        if let Some(seed) = self.seed {
            config.topology.seed = seed;
        }
        if self.fail.is_some() {
            config.failure.node = self.fail;
        }
        if self.dot.is_some() {
            config.output.dot_path = self.dot.clone();
        }
        if self.json.is_some() {
            config.output.json_path = self.json.clone();
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let mut config = SimConfig::load(&args.config)?;
    args.apply(&mut config);
    logging::init(&config.logging);

    tracing::info!("AODV simulator v{}", env!("CARGO_PKG_VERSION"));

    let (sim, summary) = simulation::run(&config)?;

    if args.show_broadcasts {
        for rreq in &summary.broadcasts {
            println!("Broadcasting {rreq}");
        }
    }

    if summary.path.is_empty() {
        println!(
            "AODV route {} -> {} not found",
            summary.source, summary.destination
        );
    } else {
        let cost = summary
            .cost
            .map_or_else(|| "?".to_string(), |c| format!("{c:.2}"));
        println!(
            "AODV route found: {} ({} hops, cost {cost})",
            summary.path,
            summary.path.hop_count()
        );
    }

    if let Some(ref repair) = summary.repair {
        println!();
        print!("{}", report::render_repair(repair));
    }

    println!();
    print!("{}", report::render_tables(&summary.tables));

    if let Some(ref dot_path) = config.output.dot_path {
        std::fs::write(dot_path, visualize::to_dot(sim.graph(), &summary.path))?;
        tracing::info!(path = %dot_path.display(), "wrote topology rendering");
    }

    if let Some(ref json_path) = config.output.json_path {
        std::fs::write(json_path, serde_json::to_string_pretty(&summary)?)?;
        tracing::info!(path = %json_path.display(), "wrote run snapshot");
    }

    Ok(())
}
