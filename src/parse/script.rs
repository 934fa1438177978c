use crate::model::filter::Filter;
use crate::model::task::{NewTask, TaskId};
use crate::util::dates::parse_date;

/// One line of a session script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `add <title> | <description> | <YYYY-MM-DD>`
    Add(NewTask),
    Finish(TaskId),
    Unfinish(TaskId),
    FinishAll,
    UnfinishAll,
    Filter(Filter),
}

/// Error type for script parsing. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' needs an argument")]
    MissingArgument { line: usize, command: &'static str },
    #[error("line {line}: invalid task id '{value}'")]
    BadId { line: usize, value: String },
    #[error("line {line}: invalid date '{value}' (expected YYYY-MM-DD)")]
    BadDate { line: usize, value: String },
    #[error("line {line}: {message}")]
    BadFilter { line: usize, message: String },
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        steps.push(parse_step(line, i + 1)?);
    }
    Ok(steps)
}

fn parse_step(line: &str, line_no: usize) -> Result<Step, ScriptError> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r.trim()),
        None => (line, ""),
    };

    match command {
        "add" => parse_add(rest, line_no),
        "finish" => Ok(Step::Finish(parse_id(rest, "finish", line_no)?)),
        "unfinish" => Ok(Step::Unfinish(parse_id(rest, "unfinish", line_no)?)),
        "finish-all" => Ok(Step::FinishAll),
        "unfinish-all" => Ok(Step::UnfinishAll),
        "filter" => {
            if rest.is_empty() {
                return Err(ScriptError::MissingArgument {
                    line: line_no,
                    command: "filter",
                });
            }
            rest.parse()
                .map(Step::Filter)
                .map_err(|message| ScriptError::BadFilter {
                    line: line_no,
                    message,
                })
        }
        other => Err(ScriptError::UnknownCommand {
            line: line_no,
            command: other.to_string(),
        }),
    }
}

/// Fields are `|`-separated. Empty titles parse fine; the store rejects them.
fn parse_add(rest: &str, line_no: usize) -> Result<Step, ScriptError> {
    let mut fields = rest.splitn(3, '|').map(str::trim);
    let title = fields.next().unwrap_or_default();
    let description = fields.next().unwrap_or_default();
    let mut draft = NewTask::new(title, description);

    if let Some(due) = fields.next().filter(|s| !s.is_empty()) {
        let date = parse_date(due).ok_or_else(|| ScriptError::BadDate {
            line: line_no,
            value: due.to_string(),
        })?;
        draft = draft.with_due_date(date);
    }
    Ok(Step::Add(draft))
}

fn parse_id(rest: &str, command: &'static str, line_no: usize) -> Result<TaskId, ScriptError> {
    if rest.is_empty() {
        return Err(ScriptError::MissingArgument {
            line: line_no,
            command,
        });
    }
    rest.trim_start_matches('#')
        .parse::<u64>()
        .map(TaskId)
        .map_err(|_| ScriptError::BadId {
            line: line_no,
            value: rest.to_string(),
        })
}
