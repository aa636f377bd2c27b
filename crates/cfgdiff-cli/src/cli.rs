use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cfgdiff",
    about = "Compare two JSON configuration snapshots key by key",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the flattened differences between two snapshots
    Diff(DiffArgs),
    /// Show the old and new snapshots as aligned panels
    Panels(PanelsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The original snapshot
    pub old: PathBuf,
    /// The modified snapshot
    pub new: PathBuf,
    /// Include unchanged keys
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct PanelsArgs {
    /// The original snapshot
    pub old: PathBuf,
    /// The modified snapshot
    pub new: PathBuf,
    /// TOML file with panel titles and theme colors
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
