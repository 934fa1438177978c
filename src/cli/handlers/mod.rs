mod replay;
pub use replay::{apply_step, cmd_replay};

use crate::cli::commands::*;
use crate::cli::output::TodayJson;
use crate::model::config::AppConfig;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    match cli.command {
        None => {
            eprintln!("no subcommand given; run `tl` without arguments for the terminal UI");
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::Replay(args) => cmd_replay(args, &config, json),
            Commands::Today(args) => cmd_today(args, &config, json),
        },
    }
}

fn cmd_today(args: TodayArgs, config: &AppConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(config);
    if json {
        let out = TodayJson {
            date: session.current_date().to_string(),
            short: session.current_date_short().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if args.short {
        println!("{}", session.current_date_short());
    } else {
        println!("{}", session.current_date());
    }
    Ok(())
}
