use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Session-unique task identifier, assigned by the store in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which partition a task currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Active,
    Finished,
}

impl TaskState {
    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskState::Active => ' ',
            TaskState::Finished => 'x',
        }
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Task title text (never empty)
    pub title: String,
    /// Free-form description, may be empty
    pub description: String,
    /// Only set when the due-date feature is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub finished: bool,
    /// Creation order; restores active ordering after a task is unfinished
    pub original_index: usize,
    /// Display timestamp captured at creation, e.g. `3:45 PM, Sat, 24 Sep`
    pub created: String,
}

impl Task {
    pub fn state(&self) -> TaskState {
        if self.finished {
            TaskState::Finished
        } else {
            TaskState::Active
        }
    }
}

/// A validated-on-submit task descriptor, produced by the creation flow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            description: description.into(),
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_follows_flag() {
        let mut task = Task {
            id: TaskId(0),
            title: "Buy milk".into(),
            description: String::new(),
            due_date: None,
            finished: false,
            original_index: 0,
            created: String::new(),
        };
        assert_eq!(task.state(), TaskState::Active);
        assert_eq!(task.state().checkbox_char(), ' ');
        task.finished = true;
        assert_eq!(task.state(), TaskState::Finished);
        assert_eq!(task.state().checkbox_char(), 'x');
    }

    #[test]
    fn test_due_date_omitted_from_json_when_absent() {
        let task = Task {
            id: TaskId(3),
            title: "Call mom".into(),
            description: "Sunday".into(),
            due_date: None,
            finished: false,
            original_index: 3,
            created: "9:05 AM, Sat, 24 Sep".into(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 3);
        assert!(json.get("due_date").is_none());
    }
}
