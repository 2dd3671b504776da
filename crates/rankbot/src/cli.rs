//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

/// rankbot - Twitch chat bot for League of Legends rank and session stats
#[derive(Parser, Debug)]
#[command(name = "rankbot")]
#[command(about = "Twitch chat bot for League of Legends rank and session stats", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Extra tunables file, applied over all other sources
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Command definitions file, overriding `paths.commands`
    #[arg(long)]
    pub commands: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}
