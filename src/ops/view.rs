use crate::model::filter::Filter;
use crate::model::task::Task;
use crate::ops::store::TaskStore;

/// The tasks to display for `filter`. `All` groups unfinished tasks before finished ones.
pub fn visible_tasks(store: &TaskStore, filter: Filter) -> Vec<&Task> {
    match filter {
        Filter::Active => store.active(),
        Filter::Finished => store.finished(),
        Filter::All => {
            let mut tasks = store.active();
            tasks.extend(store.finished());
            tasks
        }
    }
}

/// Per-filter counts for the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCounts {
    pub all: usize,
    pub active: usize,
    pub finished: usize,
}

impl FilterCounts {
    pub fn of(store: &TaskStore) -> Self {
        let active = store.active().len();
        FilterCounts {
            all: store.len(),
            active,
            finished: store.len() - active,
        }
    }

    pub fn get(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.all,
            Filter::Active => self.active,
            Filter::Finished => self.finished,
        }
    }
}
