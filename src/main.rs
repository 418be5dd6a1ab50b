//! Binora CLI - Level VO Tools
//!
//! Command-line interface for simulating Binora levels and checking their assets.

use anyhow::Context;
use clap::Parser;
use log::info;
use tracing_subscriber::EnvFilter;

use binora::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger; also captures `log` records
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Binora level tools v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Binora level tools v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Simulate {
            config,
            assets,
            memorization_secs,
            json,
        } => commands::simulate(config.as_deref(), assets.as_deref(), memorization_secs, json)
            .context("level simulation failed"),
        Commands::CheckAssets { config, assets } => {
            commands::check_assets(config.as_deref(), assets.as_deref())
                .context("asset check failed")
        }
        Commands::InitConfig { path, force } => commands::init_config(&path, force)
            .with_context(|| format!("could not write config to {}", path.display())),
    }
}
