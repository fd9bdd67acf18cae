//! AODV simulator CLI — route discovery and local repair over a random topology.
//!
//! Subcommands: init, run.

mod commands;

use clap::{Parser, Subcommand};

/// AODV — on-demand route discovery simulator.
#[derive(Parser, Debug)]
#[command(name = "aodv-sim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default simulation configuration.
    Init(commands::init::InitArgs),
    /// Run a simulation.
    Run(commands::run::RunArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Run(args) => commands::run::run(args),
    }
}
