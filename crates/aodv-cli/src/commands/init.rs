//! `aodv-sim init` — Write a default simulation configuration.

use aodv_cli::SimConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("aodv.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    SimConfig::default().save(&config_path)?;
    println!("Initialized simulation config at {}", config_path.display());
    println!("Edit aodv.toml to customize the topology and discovery.");
    println!("Run 'aodv-sim run' to start a simulation.");

    Ok(())
}
