use std::fs;
use std::io::Read;

use tracing::info;

use crate::cli::commands::ReplayArgs;
use crate::cli::output::{format_task_list, session_to_json};
use crate::model::config::AppConfig;
use crate::parse::{Step, parse_script};
use crate::session::{Session, SessionError};

pub fn cmd_replay(args: ReplayArgs, config: &AppConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = if args.script == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.script)
            .map_err(|e| format!("cannot read script '{}': {}", args.script, e))?
    };
    let steps = parse_script(&text)?;
    info!(steps = steps.len(), "replaying script");

    let mut session = Session::new(config);
    for step in steps {
        if let Err(e) = apply_step(&mut session, step) {
            eprintln!("warning: {}", e);
        }
    }
    if let Some(filter) = args.filter {
        session.select_filter(filter);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session_to_json(&session))?);
    } else {
        let listing = format_task_list(&session.visible_tasks());
        if !listing.is_empty() {
            println!("{}", listing);
        }
    }
    Ok(())
}

/// Apply one script step the way the UI would. `add` goes through the new-task form,
/// which is cancelled if the draft is rejected.
pub fn apply_step(session: &mut Session, step: Step) -> Result<(), SessionError> {
    match step {
        Step::Add(draft) => {
            session.open_new_task();
            session.edit_draft(|d| {
                d.title = draft.title;
                d.description = draft.description;
                if draft.due_date.is_some() {
                    d.due_date = draft.due_date;
                }
            });
            let result = session.confirm_new_task();
            if result.is_err() {
                session.cancel_new_task();
            }
            result.map(|_| ())
        }
        Step::Finish(id) => session.set_finished(id, true),
        Step::Unfinish(id) => session.set_finished(id, false),
        Step::FinishAll => session.set_all_finished(true).map(|_| ()),
        Step::UnfinishAll => session.set_all_finished(false).map(|_| ()),
        Step::Filter(filter) => {
            session.select_filter(filter);
            Ok(())
        }
    }
}
