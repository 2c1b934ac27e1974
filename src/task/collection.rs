//! Ordered in-memory task container

use tracing::warn;

use super::model::{Task, TaskId};
use crate::error::{Result, TrackerError};

/// Ordered sequence of tasks with unique ids.
///
/// Readers only ever get clones through [`TaskCollection::snapshot`], so a
/// caller holding a snapshot never observes a later replace.
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    /// Next free id: one past the current maximum.
    ///
    /// Fails once a task already holds `u32::MAX`.
    pub fn next_id(&self) -> Result<TaskId> {
        let max = self.tasks.iter().map(|t| t.id).max().unwrap_or(TaskId(0));
        max.offset(1).ok_or(TrackerError::IdsExhausted {
            from: u64::from(max.0) + 1,
            count: 1,
        })
    }

    /// Append a task. Returns `false` if its id is already taken.
    pub fn append(&mut self, task: Task) -> bool {
        if self.contains(task.id) {
            warn!("Skipping task {}: id already in collection", task.id);
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Append tasks in order, returning how many were accepted
    pub fn extend(&mut self, tasks: impl IntoIterator<Item = Task>) -> usize {
        tasks
            .into_iter()
            .map(|task| self.append(task))
            .filter(|added| *added)
            .count()
    }

    /// Replace the whole collection, keeping the first task for each id.
    /// Returns how many were kept.
    pub fn replace(&mut self, tasks: Vec<Task>) -> usize {
        self.tasks.clear();
        self.extend(tasks)
    }

    /// Defensive copy of the current order
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }
}
