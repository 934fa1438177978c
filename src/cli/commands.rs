use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::config::Variant;
use crate::model::filter::Filter;

#[derive(Parser)]
#[command(name = "tl", about = concat!("[x] tasklist v", env!("CARGO_PKG_VERSION"), " - a to-do list for the session at hand"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./tasklist.toml when present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Product variant, overriding the config file
    #[arg(long, value_enum, global = true)]
    pub variant: Option<Variant>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a session script and print the resulting task list
    Replay(ReplayArgs),
    /// Print the date header
    Today(TodayArgs),
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Script file, or `-` for stdin
    pub script: String,
    /// Filter to print with, overriding the script's last `filter` line
    #[arg(long)]
    pub filter: Option<Filter>,
}

#[derive(Args)]
pub struct TodayArgs {
    /// Abbreviated weekday (`Sat, 24 Sep`)
    #[arg(long)]
    pub short: bool,
}
