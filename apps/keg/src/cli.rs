//! Command line interface definition

use clap::{Parser, Subcommand};
use keg_types::ColorChoice;
use std::path::PathBuf;

/// keg - build and install formulae into a keg prefix
#[derive(Parser)]
#[command(name = "keg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and install formulae into a keg prefix")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write structured debug logs to the keg log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Install formulae and their dependencies
    #[command(alias = "i")]
    Install {
        /// Formula names
        formulae: Vec<String>,

        /// Install even if the formula is blacklisted
        #[arg(short, long)]
        force: bool,

        /// Build from the formula's development trunk
        #[arg(long = "HEAD")]
        head: bool,

        // Accepted only so the install command can point at `--HEAD`
        #[arg(long = "head", hide = true)]
        lowercase_head: bool,
    },
}
