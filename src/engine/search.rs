//! Read-only task searches

use crate::task::{Task, TaskId, TaskPriority};

/// Case-insensitive substring match on the title. An empty needle matches
/// every task.
pub fn search_by_title(tasks: &[Task], needle: &str) -> Vec<Task> {
    let needle = needle.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn search_by_priority(tasks: &[Task], priority: TaskPriority) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| t.priority == priority)
        .cloned()
        .collect()
}

/// Binary search by id.
///
/// `tasks` must already be sorted ascending by id. This is not checked: on
/// unsorted input the result is unspecified (a present task may be missed).
pub fn binary_search_by_id(tasks: &[Task], id: TaskId) -> Option<&Task> {
    let mut low = 0;
    let mut high = tasks.len();

    while low < high {
        let mid = low + (high - low) / 2;
        let candidate = &tasks[mid];
        if candidate.id == id {
            return Some(candidate);
        } else if candidate.id < id {
            low = mid + 1;
        } else {
            high = mid;
        }
    }

    None
}

/// Case-insensitive substring match on title or description
pub fn search_text(tasks: &[Task], term: &str) -> Vec<Task> {
    let term = term.to_lowercase();
    tasks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&term) || t.description.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: u32, title: &str, description: &str, priority: TaskPriority) -> Task {
        Task::new(
            TaskId(id),
            title,
            priority,
            NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        )
        .with_description(description)
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", "", TaskPriority::Low),
            task(3, "Write report", "quarterly numbers", TaskPriority::High),
            task(5, "Call plumber", "about the MILK pipe", TaskPriority::High),
            task(8, "Plan trip", "", TaskPriority::Urgent),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_search_by_title_case_insensitive() {
        assert_eq!(ids(&search_by_title(&sample(), "MILK")), vec![1]);
        assert_eq!(ids(&search_by_title(&sample(), "r")), vec![3, 5, 8]);
    }

    #[test]
    fn test_search_by_title_empty_needle_matches_all() {
        assert_eq!(search_by_title(&sample(), "").len(), 4);
        assert!(search_by_title(&sample(), "zzz-nonexistent").is_empty());
    }

    #[test]
    fn test_search_by_priority() {
        assert_eq!(
            ids(&search_by_priority(&sample(), TaskPriority::High)),
            vec![3, 5]
        );
        assert!(search_by_priority(&sample(), TaskPriority::Medium).is_empty());
    }

    #[test]
    fn test_binary_search() {
        let tasks = sample();
        for id in [1, 3, 5, 8] {
            assert_eq!(
                binary_search_by_id(&tasks, TaskId(id)).map(|t| t.id),
                Some(TaskId(id))
            );
        }
        for id in [0, 2, 4, 7, 9, 1000] {
            assert!(binary_search_by_id(&tasks, TaskId(id)).is_none());
        }
    }

    #[test]
    fn test_binary_search_empty() {
        assert!(binary_search_by_id(&[], TaskId(1)).is_none());
    }

    #[test]
    fn test_search_text_covers_description() {
        assert_eq!(ids(&search_text(&sample(), "milk")), vec![1, 5]);
        assert_eq!(ids(&search_text(&sample(), "Quarterly")), vec![3]);
        assert_eq!(search_text(&sample(), "").len(), 4);
    }
}
