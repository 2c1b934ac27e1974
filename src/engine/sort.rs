//! Task sorting
//!
//! Every sort returns a new vector and leaves its input untouched. The
//! algorithm-named sorts (quick, bubble, merge) are written out by hand and
//! always order by id; the key-named sorts use the standard stable sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::task::Task;

/// Comparison key for the stable sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    DueDate,
    Title,
    Id,
}

impl SortKey {
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => a.priority.cmp(&b.priority),
            Self::DueDate => a.due.cmp(&b.due),
            Self::Title => a.title.cmp(&b.title),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Hand-written sort algorithms, all ordering by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    Quick,
    Bubble,
    Merge,
}

/// What to sort by and how
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortSpec {
    /// Standard stable sort on a key
    Stable(SortKey),
    /// Literal algorithm on the id key
    Algorithm(SortAlgorithm),
    /// Sort even-id tasks among their own slots, leave odd ids in place
    IdParity,
}

impl SortSpec {
    /// Menu entries in display order
    pub const MENU: [(SortSpec, &'static str); 7] = [
        (SortSpec::Stable(SortKey::Priority), "By priority"),
        (SortSpec::Stable(SortKey::DueDate), "By due date"),
        (SortSpec::Stable(SortKey::Title), "By title"),
        (SortSpec::Algorithm(SortAlgorithm::Quick), "Quicksort (by id)"),
        (SortSpec::Algorithm(SortAlgorithm::Bubble), "Bubble sort (by id)"),
        (SortSpec::Algorithm(SortAlgorithm::Merge), "Merge sort (by id)"),
        (SortSpec::IdParity, "Id parity (even ids sorted in place)"),
    ];
}

impl FromStr for SortSpec {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let spec = match s.trim().to_lowercase().as_str() {
            "1" | "priority" => Self::Stable(SortKey::Priority),
            "2" | "date" | "due" | "due-date" => Self::Stable(SortKey::DueDate),
            "3" | "title" => Self::Stable(SortKey::Title),
            "4" | "quick" | "quicksort" => Self::Algorithm(SortAlgorithm::Quick),
            "5" | "bubble" | "bubblesort" => Self::Algorithm(SortAlgorithm::Bubble),
            "6" | "merge" | "mergesort" => Self::Algorithm(SortAlgorithm::Merge),
            "7" | "parity" | "id-parity" => Self::IdParity,
            "id" => Self::Stable(SortKey::Id),
            _ => return Err(TrackerError::InvalidSelector(s.to_string())),
        };
        Ok(spec)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stable(SortKey::Priority) => "priority",
            Self::Stable(SortKey::DueDate) => "date",
            Self::Stable(SortKey::Title) => "title",
            Self::Stable(SortKey::Id) => "id",
            Self::Algorithm(SortAlgorithm::Quick) => "quick",
            Self::Algorithm(SortAlgorithm::Bubble) => "bubble",
            Self::Algorithm(SortAlgorithm::Merge) => "merge",
            Self::IdParity => "parity",
        };
        write!(f, "{}", name)
    }
}

/// Sort a copy of `tasks`
pub fn sort_tasks(tasks: &[Task], spec: SortSpec) -> Vec<Task> {
    debug!(%spec, len = tasks.len(), "sorting tasks");

    match spec {
        SortSpec::Stable(key) => {
            let mut sorted = tasks.to_vec();
            sorted.sort_by(|a, b| key.compare(a, b));
            sorted
        }
        SortSpec::Algorithm(SortAlgorithm::Quick) => {
            let mut sorted = tasks.to_vec();
            quicksort(&mut sorted);
            sorted
        }
        SortSpec::Algorithm(SortAlgorithm::Bubble) => {
            let mut sorted = tasks.to_vec();
            bubble_sort(&mut sorted);
            sorted
        }
        SortSpec::Algorithm(SortAlgorithm::Merge) => merge_sort(tasks),
        SortSpec::IdParity => sort_even_ids(tasks),
    }
}

/// Parse a selector and sort. An unknown selector sorts nothing.
pub fn sort_by_selector(tasks: &[Task], selector: &str) -> Result<Vec<Task>> {
    let spec: SortSpec = selector.parse()?;
    Ok(sort_tasks(tasks, spec))
}

fn quicksort(tasks: &mut [Task]) {
    let mut slice = tasks;
    // Recurse into the smaller half and loop on the larger one so the stack
    // depth stays logarithmic.
    while slice.len() > 1 {
        let pivot = partition(slice);
        let (left, right) = std::mem::take(&mut slice).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            quicksort(left);
            slice = right;
        } else {
            quicksort(right);
            slice = left;
        }
    }
}

/// Lomuto partition around the middle element. Returns the pivot's final index.
fn partition(tasks: &mut [Task]) -> usize {
    let last = tasks.len() - 1;
    tasks.swap(tasks.len() / 2, last);

    let mut store = 0;
    for i in 0..last {
        if tasks[i].id < tasks[last].id {
            tasks.swap(i, store);
            store += 1;
        }
    }
    tasks.swap(store, last);
    store
}

fn bubble_sort(tasks: &mut [Task]) {
    let mut end = tasks.len();
    while end > 1 {
        let mut swapped = false;
        for i in 1..end {
            if tasks[i - 1].id > tasks[i].id {
                tasks.swap(i - 1, i);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        end -= 1;
    }
}

fn merge_sort(tasks: &[Task]) -> Vec<Task> {
    if tasks.len() <= 1 {
        return tasks.to_vec();
    }

    let (left, right) = tasks.split_at(tasks.len() / 2);
    let left = merge_sort(left);
    let right = merge_sort(right);

    let mut merged = Vec::with_capacity(tasks.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l.id <= r.id,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}

fn sort_even_ids(tasks: &[Task]) -> Vec<Task> {
    let slots: Vec<usize> = tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id.is_even())
        .map(|(i, _)| i)
        .collect();

    let mut evens: Vec<Task> = slots.iter().map(|&i| tasks[i].clone()).collect();
    evens.sort_by_key(|t| t.id);

    let mut sorted = tasks.to_vec();
    for (slot, task) in slots.into_iter().zip(evens) {
        sorted[slot] = task;
    }
    sorted
}
