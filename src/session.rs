use chrono::NaiveDate;
use tracing::debug;

use crate::model::config::{AppConfig, Features};
use crate::model::filter::Filter;
use crate::model::task::{NewTask, Task, TaskId};
use crate::ops::creation::CreationFlow;
use crate::ops::store::{StoreEvent, StoreObserver, TaskError, TaskStore};
use crate::ops::view::{FilterCounts, visible_tasks};
use crate::util::dates::{Clock, SystemClock};

/// Error type for session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error("{0} are not enabled for this variant")]
    FeatureDisabled(&'static str),
    #[error("no new task form is open")]
    NoDraft,
}

/// All state of one running to-do session: tasks, filter selection, and the new-task form.
pub struct Session {
    store: TaskStore,
    filter: Filter,
    creation: CreationFlow,
    features: Features,
    today: NaiveDate,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Box<dyn Clock>) -> Self {
        let features = config.features();
        let today = clock.today();
        let mut store = TaskStore::new(config.partitioning(), clock)
            .require_description(features.require_description);
        store.subscribe(Box::new(|event: &StoreEvent| {
            debug!(?event, "task store changed");
        }));
        debug!(
            variant = ?config.variant,
            partitioning = ?store.partitioning(),
            "session started"
        );

        Session {
            store,
            filter: Filter::default(),
            creation: CreationFlow::new(features),
            features,
            today,
        }
    }

    /// Register a view that wants to hear about every store change
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.store.subscribe(observer);
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn features(&self) -> Features {
        self.features
    }

    /// `Saturday, 24 Sep`
    pub fn current_date(&self) -> &str {
        &self.store.session_date().long
    }

    /// `Sat, 24 Sep`
    pub fn current_date_short(&self) -> &str {
        &self.store.session_date().short
    }

    // --- Tasks ---

    pub fn add_task(&mut self, mut draft: NewTask) -> Result<Task, SessionError> {
        if !self.features.due_date {
            draft.due_date = None;
        }
        Ok(self.store.add_task(draft)?)
    }

    pub fn set_finished(&mut self, id: TaskId, finished: bool) -> Result<(), SessionError> {
        Ok(self.store.set_finished(id, finished)?)
    }

    /// Finish or unfinish everything. Returns how many tasks changed.
    pub fn set_all_finished(&mut self, finished: bool) -> Result<usize, SessionError> {
        if !self.features.bulk_actions {
            return Err(SessionError::FeatureDisabled("bulk actions"));
        }
        Ok(self.store.set_all_finished(finished))
    }

    // --- Filter ---

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn select_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        visible_tasks(&self.store, self.filter)
    }

    pub fn counts(&self) -> FilterCounts {
        FilterCounts::of(&self.store)
    }

    // --- New task form ---

    pub fn creation(&self) -> &CreationFlow {
        &self.creation
    }

    pub fn is_creating(&self) -> bool {
        self.creation.is_open()
    }

    pub fn draft(&self) -> Option<&NewTask> {
        self.creation.draft()
    }

    pub fn open_new_task(&mut self) {
        self.creation.open(self.today);
    }

    /// Edit the open draft; no effect while the form is closed.
    pub fn edit_draft(&mut self, f: impl FnOnce(&mut NewTask)) {
        self.creation.edit(f);
    }

    pub fn shift_due_date(&mut self, days: i64) {
        self.creation.shift_due_date(days);
    }

    /// Submit the form. On a validation error the form stays open with its input.
    pub fn confirm_new_task(&mut self) -> Result<Task, SessionError> {
        if !self.creation.is_open() {
            return Err(SessionError::NoDraft);
        }
        self.creation.check()?;
        let draft = self.creation.confirm().ok_or(SessionError::NoDraft)?;
        self.add_task(draft)
    }

    pub fn cancel_new_task(&mut self) {
        self.creation.cancel();
    }
}
