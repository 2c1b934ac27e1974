//! Random task generation

use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

use super::model::{Task, TaskId, TaskPriority};
use crate::error::{Result, TrackerError};

pub const VERBS: &[&str] = &[
    "Buy", "Plan", "Review", "Write", "Fix", "Call", "Clean", "Book", "Prepare", "Refactor",
    "Update", "Schedule",
];

pub const NOUNS: &[&str] = &[
    "milk", "trip", "report", "budget", "invoice", "dentist", "garage", "tickets", "slides",
    "parser", "backup", "meeting",
];

pub const NOTES: &[&str] = &[
    "before the weekend",
    "ask for feedback",
    "check the old notes first",
    "low effort",
    "blocked on a reply",
    "",
];

/// Maximum distance of a generated due date from `today`
pub const MAX_DUE_DAYS: i64 = 60;

/// Generate `count` tasks with sequential ids starting at `first_id`.
///
/// Fails without generating anything if the last id would not fit in a `u32`.
pub fn generate_tasks<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    first_id: TaskId,
    today: NaiveDate,
) -> Result<Vec<Task>> {
    if count > 0 && first_id.offset(count - 1).is_none() {
        return Err(TrackerError::IdsExhausted {
            from: u64::from(first_id.0),
            count,
        });
    }

    let tasks = (0..count)
        .map_while(|offset| {
            let id = first_id.offset(offset)?;
            let verb = VERBS.choose(rng).unwrap_or(&"Do");
            let noun = NOUNS.choose(rng).unwrap_or(&"things");
            let priority = TaskPriority::ALL[rng.gen_range(0..TaskPriority::ALL.len())];
            let due = today + Duration::days(rng.gen_range(0..=MAX_DUE_DAYS));
            let note = NOTES.choose(rng).unwrap_or(&"");

            let task = Task::new(id, format!("{} {}", verb, noun), priority, due);
            Some(task.with_description(*note))
        })
        .collect();
    Ok(tasks)
}
