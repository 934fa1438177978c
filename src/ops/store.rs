use tracing::warn;

use crate::model::config::Partitioning;
use crate::model::task::{NewTask, Task, TaskId};
use crate::util::dates::{Clock, SessionDate, created_stamp};

/// Error type for task store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task title is required")]
    MissingTitle,
    #[error("task description is required")]
    MissingDescription,
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Check the required fields of a descriptor.
pub fn validate(draft: &NewTask, require_description: bool) -> Result<(), TaskError> {
    if draft.title.trim().is_empty() {
        return Err(TaskError::MissingTitle);
    }
    if require_description && draft.description.trim().is_empty() {
        return Err(TaskError::MissingDescription);
    }
    Ok(())
}

/// A change that has been applied to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added { id: TaskId },
    FinishedChanged { id: TaskId, finished: bool },
    /// `changed` counts the tasks whose flag actually flipped
    BulkFinished { finished: bool, changed: usize },
}

/// Receives every event after the mutation has been applied
pub trait StoreObserver {
    fn on_event(&mut self, event: &StoreEvent);
}

impl<F: FnMut(&StoreEvent)> StoreObserver for F {
    fn on_event(&mut self, event: &StoreEvent) {
        self(event)
    }
}

enum Lists {
    Flagged(Vec<Task>),
    Physical {
        /// Always sorted by `original_index`
        active: Vec<Task>,
        /// In the order tasks were finished
        finished: Vec<Task>,
    },
}

/// Owns every task of the session and the id counter.
pub struct TaskStore {
    lists: Lists,
    next_id: u64,
    require_description: bool,
    clock: Box<dyn Clock>,
    session_date: SessionDate,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl TaskStore {
    /// Create an empty store. The session date is captured from `clock` now.
    pub fn new(partitioning: Partitioning, clock: Box<dyn Clock>) -> Self {
        let lists = match partitioning {
            Partitioning::Flagged => Lists::Flagged(Vec::new()),
            Partitioning::Physical => Lists::Physical {
                active: Vec::new(),
                finished: Vec::new(),
            },
        };
        let session_date = SessionDate::from_datetime(clock.now());
        TaskStore {
            lists,
            next_id: 0,
            require_description: false,
            clock,
            session_date,
            observers: Vec::new(),
        }
    }

    /// Reject descriptors with an empty description
    pub fn require_description(mut self, required: bool) -> Self {
        self.require_description = required;
        self
    }

    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    pub fn partitioning(&self) -> Partitioning {
        match self.lists {
            Lists::Flagged(_) => Partitioning::Flagged,
            Lists::Physical { .. } => Partitioning::Physical,
        }
    }

    pub fn session_date(&self) -> &SessionDate {
        &self.session_date
    }

    /// The id the next successful `add_task` will assign
    pub fn next_id(&self) -> TaskId {
        TaskId(self.next_id)
    }

    pub fn len(&self) -> usize {
        match &self.lists {
            Lists::Flagged(tasks) => tasks.len(),
            Lists::Physical { active, finished } => active.len() + finished.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every task, in storage order (the physical store yields its active list first)
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        let (first, second): (&[Task], &[Task]) = match &self.lists {
            Lists::Flagged(tasks) => (tasks.as_slice(), &[][..]),
            Lists::Physical { active, finished } => (active.as_slice(), finished.as_slice()),
        };
        first.iter().chain(second.iter())
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.iter().find(|t| t.id == id)
    }

    /// Unfinished tasks in creation order
    pub fn active(&self) -> Vec<&Task> {
        match &self.lists {
            Lists::Flagged(tasks) => tasks.iter().filter(|t| !t.finished).collect(),
            Lists::Physical { active, .. } => active.iter().collect(),
        }
    }

    /// Finished tasks in collection order
    pub fn finished(&self) -> Vec<&Task> {
        match &self.lists {
            Lists::Flagged(tasks) => tasks.iter().filter(|t| t.finished).collect(),
            Lists::Physical { finished, .. } => finished.iter().collect(),
        }
    }

    /// Validate and append a new task. Returns a copy of the created task.
    pub fn add_task(&mut self, draft: NewTask) -> Result<Task, TaskError> {
        validate(&draft, self.require_description)?;

        let task = Task {
            id: TaskId(self.next_id),
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            finished: false,
            original_index: self.len(),
            created: created_stamp(self.clock.now(), &self.session_date.short),
        };
        match &mut self.lists {
            Lists::Flagged(tasks) => tasks.push(task.clone()),
            Lists::Physical { active, .. } => active.push(task.clone()),
        }
        self.next_id += 1;

        self.notify(StoreEvent::Added { id: task.id });
        Ok(task)
    }

    /// Set the finished flag of one task. Setting the current value is a no-op.
    pub fn set_finished(&mut self, id: TaskId, finished: bool) -> Result<(), TaskError> {
        let changed = match &mut self.lists {
            Lists::Flagged(tasks) => match tasks.iter_mut().find(|t| t.id == id) {
                Some(task) if task.finished == finished => Some(false),
                Some(task) => {
                    task.finished = finished;
                    Some(true)
                }
                None => None,
            },
            Lists::Physical { active, finished: done } => {
                let (from, to) = if finished {
                    (active, done)
                } else {
                    (done, active)
                };
                if let Some(pos) = from.iter().position(|t| t.id == id) {
                    let mut task = from.remove(pos);
                    task.finished = finished;
                    to.push(task);
                    if !finished {
                        to.sort_by_key(|t| t.original_index);
                    }
                    Some(true)
                } else if to.iter().any(|t| t.id == id) {
                    Some(false)
                } else {
                    None
                }
            }
        };

        match changed {
            None => {
                warn!(task = %id, "set_finished on unknown task");
                Err(TaskError::NotFound(id))
            }
            Some(false) => Ok(()),
            Some(true) => {
                self.notify(StoreEvent::FinishedChanged { id, finished });
                Ok(())
            }
        }
    }

    /// Set the finished flag on every task. Returns how many tasks changed.
    pub fn set_all_finished(&mut self, finished: bool) -> usize {
        let changed = match &mut self.lists {
            Lists::Flagged(tasks) => {
                let mut n = 0;
                for task in tasks.iter_mut().filter(|t| t.finished != finished) {
                    task.finished = finished;
                    n += 1;
                }
                n
            }
            Lists::Physical { active, finished: done } => {
                let (from, to) = if finished {
                    (active, done)
                } else {
                    (done, active)
                };
                let n = from.len();
                to.extend(from.drain(..).map(|mut t| {
                    t.finished = finished;
                    t
                }));
                if !finished {
                    to.sort_by_key(|t| t.original_index);
                }
                n
            }
        };

        if changed > 0 {
            self.notify(StoreEvent::BulkFinished { finished, changed });
        }
        changed
    }

    fn notify(&mut self, event: StoreEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::util::dates::fixed;
    use pretty_assertions::assert_eq;

    const BOTH: [Partitioning; 2] = [Partitioning::Flagged, Partitioning::Physical];

    fn store(p: Partitioning) -> TaskStore {
        TaskStore::new(p, Box::new(fixed(2022, 9, 24, 15, 45)))
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    fn add(store: &mut TaskStore, title: &str) -> TaskId {
        store.add_task(NewTask::new(title, "")).unwrap().id
    }

    /// Store with A, B, C added in order
    fn abc(p: Partitioning) -> (TaskStore, TaskId, TaskId, TaskId) {
        let mut s = store(p);
        let a = add(&mut s, "A");
        let b = add(&mut s, "B");
        let c = add(&mut s, "C");
        (s, a, b, c)
    }

    #[test]
    fn test_add_task_fields() {
        for p in BOTH {
            let mut s = store(p);
            let due = chrono::NaiveDate::from_ymd_opt(2022, 10, 1).unwrap();
            let task = s
                .add_task(NewTask::new("  Buy milk ", "2%").with_due_date(due))
                .unwrap();
            assert_eq!(task.id, TaskId(0));
            // Stored as typed; only the emptiness check trims
            assert_eq!(task.title, "  Buy milk ");
            assert_eq!(task.description, "2%");
            assert_eq!(task.due_date, Some(due));
            assert!(!task.finished);
            assert_eq!(task.original_index, 0);
            assert_eq!(task.created, "3:45 PM, Sat, 24 Sep");
            assert_eq!(s.get(TaskId(0)), Some(&task));
            assert_eq!(s.next_id(), TaskId(1));
        }
    }

    #[test]
    fn test_ids_strictly_increase_without_gaps() {
        for p in BOTH {
            let mut s = store(p);
            let mut ids = Vec::new();
            for i in 0..10 {
                ids.push(add(&mut s, &format!("task {}", i)));
                // Mixing in toggles must not disturb id assignment
                if i % 3 == 0 {
                    s.set_finished(ids[i], true).unwrap();
                }
            }
            let expected: Vec<TaskId> = (0..10).map(TaskId).collect();
            assert_eq!(ids, expected);
        }
    }

    #[test]
    fn test_empty_title_rejected_without_advancing_counter() {
        for p in BOTH {
            let mut s = store(p);
            assert_eq!(s.add_task(NewTask::new("", "desc")), Err(TaskError::MissingTitle));
            assert_eq!(s.add_task(NewTask::new("   ", "desc")), Err(TaskError::MissingTitle));
            assert!(s.is_empty());
            assert_eq!(s.next_id(), TaskId(0));
            assert_eq!(add(&mut s, "First"), TaskId(0));
        }
    }

    #[test]
    fn test_description_required_only_when_configured() {
        let mut lenient = store(Partitioning::Physical);
        assert!(lenient.add_task(NewTask::new("Title", "")).is_ok());

        let mut strict = store(Partitioning::Physical).require_description(true);
        assert_eq!(
            strict.add_task(NewTask::new("Title", "")),
            Err(TaskError::MissingDescription)
        );
        assert_eq!(strict.next_id(), TaskId(0));
        assert!(strict.add_task(NewTask::new("Title", "Body")).is_ok());
    }

    #[test]
    fn test_stable_reinsertion() {
        for p in BOTH {
            let (mut s, _a, b, _c) = abc(p);
            s.set_finished(b, true).unwrap();
            assert_eq!(titles(&s.active()), vec!["A", "C"]);
            s.set_finished(b, false).unwrap();
            assert_eq!(titles(&s.active()), vec!["A", "B", "C"]);
            assert!(s.finished().is_empty());
        }
    }

    #[test]
    fn test_physical_finish_appends_in_finish_order() {
        let (mut s, a, _b, c) = abc(Partitioning::Physical);
        s.set_finished(c, true).unwrap();
        s.set_finished(a, true).unwrap();
        assert_eq!(titles(&s.finished()), vec!["C", "A"]);
        assert!(s.finished().iter().all(|t| t.finished));
    }

    #[test]
    fn test_original_index_never_reassigned() {
        for p in BOTH {
            let (mut s, a, b, c) = abc(p);
            s.set_finished(a, true).unwrap();
            let d = add(&mut s, "D");
            s.set_finished(a, false).unwrap();
            s.set_all_finished(true);
            s.set_all_finished(false);
            let idx = |id| s.get(id).unwrap().original_index;
            assert_eq!((idx(a), idx(b), idx(c), idx(d)), (0, 1, 2, 3));
            assert_eq!(titles(&s.active()), vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn test_partition_invariant() {
        for p in BOTH {
            let (mut s, a, _b, c) = abc(p);
            s.set_finished(a, true).unwrap();
            s.set_finished(c, true).unwrap();
            s.set_finished(a, false).unwrap();

            let mut ids: Vec<TaskId> = s
                .active()
                .iter()
                .chain(s.finished().iter())
                .map(|t| t.id)
                .collect();
            ids.sort();
            assert_eq!(ids, vec![TaskId(0), TaskId(1), TaskId(2)]);
            assert!(s.active().iter().all(|t| !t.finished));
            assert!(s.finished().iter().all(|t| t.finished));
        }
    }

    #[test]
    fn test_set_finished_unknown_id() {
        for p in BOTH {
            let (mut s, ..) = abc(p);
            assert_eq!(
                s.set_finished(TaskId(42), true),
                Err(TaskError::NotFound(TaskId(42)))
            );
            assert_eq!(s.active().len(), 3);
        }
    }

    #[test]
    fn test_set_finished_same_value_is_noop() {
        for p in BOTH {
            let (mut s, a, ..) = abc(p);
            assert_eq!(s.set_finished(a, false), Ok(()));
            assert_eq!(titles(&s.active()), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_bulk_toggles_idempotent() {
        for p in BOTH {
            let (mut s, _a, b, _c) = abc(p);
            s.set_finished(b, true).unwrap();

            assert_eq!(s.set_all_finished(true), 2);
            let once: Vec<Task> = s.iter().cloned().collect();
            assert_eq!(s.set_all_finished(true), 0);
            let twice: Vec<Task> = s.iter().cloned().collect();
            assert_eq!(once, twice);
            assert!(s.active().is_empty());

            assert_eq!(s.set_all_finished(false), 3);
            assert_eq!(s.set_all_finished(false), 0);
            assert_eq!(titles(&s.active()), vec!["A", "B", "C"]);
        }
    }

    #[test]
    fn test_bulk_on_empty_store() {
        for p in BOTH {
            let mut s = store(p);
            assert_eq!(s.set_all_finished(true), 0);
            assert_eq!(s.set_all_finished(false), 0);
            assert!(s.active().is_empty());
            assert!(s.finished().is_empty());
        }
    }

    #[test]
    fn test_observers_see_only_effective_mutations() {
        for p in BOTH {
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&events);
            let mut s = store(p);
            s.subscribe(Box::new(move |e: &StoreEvent| sink.borrow_mut().push(e.clone())));

            let a = add(&mut s, "A");
            let _ = s.add_task(NewTask::new("", ""));
            s.set_finished(a, true).unwrap();
            s.set_finished(a, true).unwrap();
            let _ = s.set_finished(TaskId(9), true);
            s.set_all_finished(true);
            s.set_all_finished(false);

            assert_eq!(
                *events.borrow(),
                vec![
                    StoreEvent::Added { id: a },
                    StoreEvent::FinishedChanged { id: a, finished: true },
                    StoreEvent::BulkFinished { finished: false, changed: 1 },
                ]
            );
        }
    }
}
