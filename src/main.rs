use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tasklist::io::config_io::{config_source, read_config};
use tasklist::model::config::{AppConfig, LogConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let (config, source) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let tui = cli.command.is_none();
    if let Err(e) = init_tracing(&config.log, tui) {
        eprintln!("warning: logging disabled: {}", e);
    }
    // Config is read before the subscriber exists, so report it now
    match &source {
        Some(path) => debug!(path = %path.display(), variant = ?config.variant, "loaded config"),
        None => debug!(variant = ?config.variant, "no config file, using defaults"),
    }

    let result = if tui {
        // No subcommand → launch TUI
        tasklist::tui::run(&config)
    } else {
        handlers::dispatch(cli, config)
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Effective config and the file it came from
fn load(cli: &Cli) -> Result<(AppConfig, Option<PathBuf>), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let source = config_source(cli.config.as_deref(), &cwd);
    let mut config = match &source {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    Ok((config, source))
}

/// RUST_LOG wins over the configured level. The TUI owns the terminal, so it
/// only logs when a log file is configured.
fn init_tracing(log: &LogConfig, tui: bool) -> Result<(), String> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(log.level.clone()).map_err(|e| e.to_string())?,
    };

    match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("open {} failed: {e}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        None if tui => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
