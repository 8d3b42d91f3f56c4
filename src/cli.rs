use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use localepack::UpdateStrategy;

/// localepack - per-locale translation fragment aggregator
#[derive(Parser, Debug)]
#[command(name = "localepack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate all fragments once and exit
    Build {
        #[command(flatten)]
        opts: ConfigArgs,
    },

    /// Aggregate, then watch for fragment changes and update incrementally
    Watch {
        #[command(flatten)]
        opts: ConfigArgs,
    },
}

/// Configuration flags shared by `build` and `watch`.
///
/// Flags override values from the config file.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to config file (default: ./localepack.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Languages to aggregate, in precedence order
    #[arg(short, long, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Root directory scanned for fragments
    #[arg(long)]
    pub lookup_dir: Option<PathBuf>,

    /// Directory receiving per-language output files
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Incremental update strategy for watch mode
    #[arg(long, value_enum)]
    pub strategy: Option<UpdateStrategy>,
}
