use chrono::{NaiveDate, TimeDelta};

use crate::model::config::Features;
use crate::model::task::NewTask;
use crate::ops::store::{TaskError, validate};

/// Form lifecycle. `Confirmed`/`Cancelled` are transient and land in `Closed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Closed,
    Open(NewTask),
}

/// The new-task form: collects a draft and yields it once the required fields are filled.
#[derive(Debug, Clone)]
pub struct CreationFlow {
    state: FlowState,
    due_date: bool,
    require_description: bool,
}

impl CreationFlow {
    pub fn new(features: Features) -> Self {
        CreationFlow {
            state: FlowState::Closed,
            due_date: features.due_date,
            require_description: features.require_description,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, FlowState::Open(_))
    }

    pub fn draft(&self) -> Option<&NewTask> {
        match &self.state {
            FlowState::Open(draft) => Some(draft),
            FlowState::Closed => None,
        }
    }

    /// Whether this form has a due date field
    pub fn has_due_date(&self) -> bool {
        self.due_date
    }

    /// Open with a blank draft. Already open: keep the current draft.
    pub fn open(&mut self, today: NaiveDate) {
        if self.is_open() {
            return;
        }
        let mut draft = NewTask::default();
        if self.due_date {
            draft.due_date = Some(today);
        }
        self.state = FlowState::Open(draft);
    }

    /// Apply an edit to the open draft; no effect while closed.
    pub fn edit(&mut self, f: impl FnOnce(&mut NewTask)) {
        if let FlowState::Open(draft) = &mut self.state {
            let due = draft.due_date;
            f(draft);
            if !self.due_date {
                draft.due_date = None;
            } else if draft.due_date.is_none() {
                // The field always carries a date
                draft.due_date = due;
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.edit(|d| d.title = title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.edit(|d| d.description = description);
    }

    pub fn set_due_date(&mut self, date: NaiveDate) {
        self.edit(|d| d.due_date = Some(date));
    }

    /// Move the due date by `days` (negative moves it earlier)
    pub fn shift_due_date(&mut self, days: i64) {
        self.edit(|d| {
            d.due_date = d
                .due_date
                .and_then(|due| due.checked_add_signed(TimeDelta::days(days)));
        });
    }

    /// Why the draft cannot be confirmed yet, if it can't
    pub fn check(&self) -> Result<(), TaskError> {
        match &self.state {
            FlowState::Open(draft) => validate(draft, self.require_description),
            FlowState::Closed => Ok(()),
        }
    }

    /// Take the draft and close, if required fields are filled. Otherwise stay open.
    pub fn confirm(&mut self) -> Option<NewTask> {
        match &self.state {
            FlowState::Open(draft) if validate(draft, self.require_description).is_ok() => {}
            _ => return None,
        }
        match std::mem::take(&mut self.state) {
            FlowState::Open(draft) => Some(draft),
            FlowState::Closed => None,
        }
    }

    /// Discard the draft and close.
    pub fn cancel(&mut self) {
        self.state = FlowState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::Variant;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 9, 24).unwrap()
    }

    #[test]
    fn test_open_starts_blank_with_default_due_date() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        assert!(!flow.is_open());
        flow.open(today());
        assert_eq!(
            flow.draft(),
            Some(&NewTask {
                title: String::new(),
                description: String::new(),
                due_date: Some(today()),
            })
        );
    }

    #[test]
    fn test_no_due_date_without_feature() {
        let mut flow = CreationFlow::new(Variant::Bulk.features());
        flow.open(today());
        flow.set_due_date(today());
        assert_eq!(flow.draft().unwrap().due_date, None);
    }

    #[test]
    fn test_confirm_yields_descriptor_and_closes() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        flow.open(today());
        flow.set_title("Buy milk");
        flow.shift_due_date(3);
        let draft = flow.confirm().unwrap();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "");
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2022, 9, 27));
        assert_eq!(flow.state(), &FlowState::Closed);
    }

    #[test]
    fn test_confirm_blocked_by_missing_fields() {
        let mut flow = CreationFlow::new(Variant::Bulk.features());
        flow.open(today());
        assert_eq!(flow.check(), Err(TaskError::MissingTitle));
        assert_eq!(flow.confirm(), None);
        assert!(flow.is_open());

        flow.set_title("Write report");
        assert_eq!(flow.check(), Err(TaskError::MissingDescription));
        assert_eq!(flow.confirm(), None);
        // Draft survives a rejected confirm
        assert_eq!(flow.draft().unwrap().title, "Write report");

        flow.set_description("Q3 numbers");
        assert!(flow.confirm().is_some());
        assert!(!flow.is_open());
    }

    #[test]
    fn test_cancel_then_reopen_is_blank() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        flow.open(today());
        flow.set_title("Leaky");
        flow.set_description("input");
        flow.shift_due_date(-1);
        flow.cancel();
        assert!(!flow.is_open());

        flow.open(today());
        let draft = flow.draft().unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.description, "");
        assert_eq!(draft.due_date, Some(today()));
    }

    #[test]
    fn test_confirm_then_reopen_is_blank() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        flow.open(today());
        flow.set_title("First");
        flow.confirm().unwrap();
        flow.open(today());
        assert_eq!(flow.draft().unwrap().title, "");
    }

    #[test]
    fn test_edits_ignored_while_closed() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        flow.set_title("ghost");
        assert_eq!(flow.confirm(), None);
        assert_eq!(flow.check(), Ok(()));
        flow.open(today());
        assert_eq!(flow.draft().unwrap().title, "");
    }

    #[test]
    fn test_reopen_while_open_keeps_draft() {
        let mut flow = CreationFlow::new(Variant::Dated.features());
        flow.open(today());
        flow.set_title("Keep me");
        flow.open(today());
        assert_eq!(flow.draft().unwrap().title, "Keep me");
    }
}
