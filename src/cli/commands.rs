//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::{info, warn};

use crate::audio::AssetRegistry;
use crate::config::LevelConfig;
use crate::error::{BinoraError, Result};
use crate::level::{run_level, SimulationOptions};

/// Load the level config and asset registry, falling back to defaults.
fn load_inputs(
    config: Option<&Path>,
    assets: Option<&Path>,
) -> Result<(LevelConfig, AssetRegistry)> {
    let config = match config {
        Some(path) => {
            info!("Loading level config: {}", path.display());
            LevelConfig::load(path)?
        }
        None => LevelConfig::default(),
    };

    let registry = match assets {
        Some(path) => {
            info!("Loading assets: {}", path.display());
            AssetRegistry::load(path)?
        }
        None => AssetRegistry::with_defaults(),
    };

    Ok((config, registry))
}

/// Load simulation inputs and apply command-line overrides.
fn simulation_inputs(
    config: Option<&Path>,
    assets: Option<&Path>,
    memorization_secs: Option<u64>,
) -> Result<(LevelConfig, AssetRegistry)> {
    let (mut config, registry) = load_inputs(config, assets)?;
    if let Some(secs) = memorization_secs {
        config.memorization_secs = secs;
    }
    Ok((config, registry))
}

/// Run a level headless and print its timeline.
///
/// Fails with [`BinoraError::LevelStalled`] if the level never reaches the
/// main menu.
pub fn simulate(
    config: Option<&Path>,
    assets: Option<&Path>,
    memorization_secs: Option<u64>,
    json: bool,
) -> Result<()> {
    let (config, registry) = simulation_inputs(config, assets, memorization_secs)?;
    let report = run_level(&config, &registry, &SimulationOptions::default())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Level run started {}", report.started_at.format("%Y-%m-%d %H:%M:%S"));
        println!("{:-<60}", "");
        for entry in &report.timeline {
            println!("{:>8.1}s  {}", entry.elapsed_ms as f64 / 1000.0, entry.event);
        }
        println!("{:-<60}", "");
        println!(
            "Final state: {} | VO instances: {} | Simulated: {:.1}s",
            report.final_state,
            report.playback_starts,
            report.elapsed_ms as f64 / 1000.0
        );
    }

    if report.stalled {
        warn!("Level stalled in {}", report.final_state);
        return Err(BinoraError::LevelStalled {
            state: report.final_state.to_string(),
        });
    }

    Ok(())
}

/// Report which of the level's VO events resolve.
pub fn check_assets(config: Option<&Path>, assets: Option<&Path>) -> Result<()> {
    let (config, registry) = load_inputs(config, assets)?;
    println!("Registered events: {}", registry.len());

    let mut missing = None;
    for (role, path) in [
        ("BeginPlay", &config.begin_play_event),
        ("GameOver", &config.game_over_event),
    ] {
        match registry.resolve(path) {
            Some(event) => println!(
                "  ok       {:<10} {} ({:.1}s)",
                role,
                path,
                event.length().as_secs_f64()
            ),
            None => {
                println!("  MISSING  {:<10} {}", role, path);
                if missing.is_none() {
                    missing = Some(path.clone());
                }
            }
        }
    }

    match missing {
        Some(path) => Err(BinoraError::AssetNotFound { path }),
        None => Ok(()),
    }
}

/// Write the default config to `path`.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(BinoraError::InvalidConfig {
            reason: format!("{} already exists (use --force to overwrite)", path.display()),
        });
    }

    LevelConfig::default().save(path)?;
    println!("Config written: {}", path.display());

    Ok(())
}
