use chrono::NaiveDate;
use serde::Serialize;

use crate::model::filter::Filter;
use crate::model::task::Task;
use crate::session::Session;
use crate::util::dates::format_due_date;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub finished: bool,
    pub created: String,
}

#[derive(Serialize)]
pub struct CountsJson {
    pub all: usize,
    pub active: usize,
    pub finished: usize,
}

#[derive(Serialize)]
pub struct SessionJson {
    pub date: String,
    pub filter: Filter,
    pub counts: CountsJson,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TodayJson {
    pub date: String,
    pub short: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        title: task.title.clone(),
        description: task.description.clone(),
        due_date: task.due_date,
        finished: task.finished,
        created: task.created.clone(),
    }
}

pub fn session_to_json(session: &Session) -> SessionJson {
    let counts = session.counts();
    SessionJson {
        date: session.current_date().to_string(),
        filter: session.filter(),
        counts: CountsJson {
            all: counts.all,
            active: counts.active,
            finished: counts.finished,
        },
        tasks: session.visible_tasks().into_iter().map(task_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// `[x] #2 Title - description (due 9/30/2022)`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "[{}] #{} {}",
        task.state().checkbox_char(),
        task.id,
        task.title
    );
    if !task.description.is_empty() {
        line.push_str(" - ");
        line.push_str(&task.description);
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!(" (due {})", format_due_date(due)));
    }
    line
}

pub fn format_task_list(tasks: &[&Task]) -> String {
    tasks
        .iter()
        .map(|t| format_task_line(t))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskId;
    use insta::assert_snapshot;

    fn task(id: u64, title: &str, description: &str) -> Task {
        Task {
            id: TaskId(id),
            title: title.into(),
            description: description.into(),
            due_date: None,
            finished: false,
            original_index: id as usize,
            created: "3:45 PM, Sat, 24 Sep".into(),
        }
    }

    #[test]
    fn test_task_line_plain() {
        assert_snapshot!(format_task_line(&task(0, "Buy milk", "")), @"[ ] #0 Buy milk");
    }

    #[test]
    fn test_task_line_full() {
        let mut t = task(2, "Pay rent", "transfer from savings");
        t.finished = true;
        t.due_date = NaiveDate::from_ymd_opt(2022, 9, 30);
        assert_snapshot!(format_task_line(&t), @"[x] #2 Pay rent - transfer from savings (due 9/30/2022)");
    }

    #[test]
    fn test_task_list_joins_lines() {
        let a = task(0, "A", "");
        let b = task(1, "B", "b");
        assert_eq!(format_task_list(&[&a, &b]), "[ ] #0 A\n[ ] #1 B - b");
        assert_eq!(format_task_list(&[]), "");
    }

    #[test]
    fn test_task_json_skips_empty_fields() {
        let json = serde_json::to_value(task_to_json(&task(4, "Walk dog", ""))).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["finished"], false);
        assert!(json.get("description").is_none());
        assert!(json.get("due_date").is_none());
    }
}
