//! CLI Module
//!
//! Command-line interface for running and checking Binora levels.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Binora level tools - VO sequencing for memory game levels
#[derive(Parser, Debug)]
#[command(name = "binora")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a level headless from intro VO to main menu
    #[command(name = "simulate")]
    Simulate {
        /// Level config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Asset manifest (JSON) or directory of WAV files
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Override the memorization phase length
        #[arg(short, long)]
        memorization_secs: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the level's VO events resolve
    #[command(name = "check-assets")]
    CheckAssets {
        /// Level config file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Asset manifest (JSON) or directory of WAV files
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },

    /// Write a default level config
    #[command(name = "init-config")]
    InitConfig {
        /// Where to write the config
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}
