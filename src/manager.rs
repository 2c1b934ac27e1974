//! Task manager: owns the collection and the counting pool

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{self, OccurrenceCounter, OccurrenceCounts, SortSpec};
use crate::error::{Result, TrackerError};
use crate::task::{Task, TaskCollection, TaskId, TaskPriority};

/// Explicit context object handed to every front end.
///
/// Engines only ever see snapshots from [`TaskManager::get_all_tasks`]; the
/// collection itself changes through `add_*` and `update_tasks`.
pub struct TaskManager {
    tasks: TaskCollection,
    counter: Option<OccurrenceCounter>,
}

impl TaskManager {
    pub fn new(workers: usize) -> Self {
        Self {
            tasks: TaskCollection::new(),
            counter: Some(OccurrenceCounter::new(workers)),
        }
    }

    /// Manager with no counting pool, for front ends that never count.
    /// [`TaskManager::count_occurrences`] fails with `CounterStopped`.
    pub fn without_counter() -> Self {
        Self {
            tasks: TaskCollection::new(),
            counter: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.counter.workers)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_id(&self) -> Result<TaskId> {
        self.tasks.next_id()
    }

    /// Append a batch in order. Returns how many were added; tasks whose id
    /// is already present are skipped.
    pub fn add_tasks(&mut self, tasks: Vec<Task>) -> usize {
        let offered = tasks.len();
        let added = self.tasks.extend(tasks);
        info!("Added {} of {} tasks", added, offered);
        added
    }

    /// Create a task with the next free id
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        due: NaiveDate,
    ) -> Result<Task> {
        let task = Task::new(self.next_id()?, title, priority, due).with_description(description);
        self.tasks.append(task.clone());
        Ok(task)
    }

    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.tasks.snapshot()
    }

    /// Replace the whole collection. Ids stay unique: a repeated id keeps
    /// its first task. Returns how many tasks were kept.
    pub fn update_tasks(&mut self, tasks: Vec<Task>) -> usize {
        let offered = tasks.len();
        let kept = self.tasks.replace(tasks);
        debug!(offered, kept, "replaced task collection");
        kept
    }

    /// Sort the current tasks and keep the result
    pub fn sort(&mut self, spec: SortSpec) -> Vec<Task> {
        let sorted = engine::sort_tasks(&self.get_all_tasks(), spec);
        self.update_tasks(sorted.clone());
        sorted
    }

    /// Like [`TaskManager::sort`], from a selector. A bad selector changes nothing.
    pub fn sort_by_selector(&mut self, selector: &str) -> Result<Vec<Task>> {
        let spec: SortSpec = selector.parse()?;
        Ok(self.sort(spec))
    }

    pub fn count_occurrences(&self, term: &str) -> Result<OccurrenceCounts> {
        let counter = self.counter.as_ref().ok_or(TrackerError::CounterStopped)?;
        counter.count(&self.get_all_tasks(), term)
    }

    pub fn counter(&self) -> Option<&OccurrenceCounter> {
        self.counter.as_ref()
    }

    /// Stop the counting pool. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(counter) = &mut self.counter {
            counter.shutdown();
        }
    }
}
