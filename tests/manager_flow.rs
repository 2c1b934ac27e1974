//! Integration tests for the task manager
//!
//! These drive the manager the way the front ends do: load a batch, take
//! snapshots, sort or count, and shut the worker pool down at the end.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use task_tracker::engine::{OccurrenceCounter, SortAlgorithm, SortSpec};
use task_tracker::task::{append_to_file, generate_tasks, Task, TaskId, TaskPriority, TasksFile};
use task_tracker::{TaskManager, TrackerError};

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 24).unwrap()
}

fn titled(titles: &[&str]) -> Vec<Task> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Task::new(TaskId(i as u32 + 1), *title, TaskPriority::Medium, due()))
        .collect()
}

#[test]
fn test_count_buy_end_to_end() {
    let mut manager = TaskManager::new(4);
    manager.add_tasks(titled(&["Buy milk", "Buy bread", "Plan trip"]));

    let counts = manager.count_occurrences("Buy").unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[&TaskId(1)], 1);
    assert_eq!(counts[&TaskId(2)], 1);
    assert!(!counts.contains_key(&TaskId(3)));

    manager.shutdown();
}

#[test]
fn test_count_independent_of_pool_size() {
    let mut rng = StdRng::seed_from_u64(99);
    let tasks = generate_tasks(&mut rng, 137, TaskId(1), due()).unwrap();

    let baseline = OccurrenceCounter::new(1).count(&tasks, "e").unwrap();
    assert!(!baseline.is_empty());

    for workers in [2, 3, 8, 200] {
        let counter = OccurrenceCounter::new(workers);
        for term in ["e", "buy", "THE", "zzz"] {
            let expected = OccurrenceCounter::new(1).count(&tasks, term).unwrap();
            assert_eq!(
                counter.count(&tasks, term).unwrap(),
                expected,
                "{} workers disagree on '{}'",
                workers,
                term
            );
        }
        assert_eq!(counter.count(&tasks, "e").unwrap(), baseline);
    }
}

#[test]
fn test_duplicate_titles_counted_separately() {
    let manager = {
        let mut manager = TaskManager::new(2);
        manager.add_tasks(titled(&["Call mom", "Call mom", "call MOM again"]));
        manager
    };

    let counts = manager.count_occurrences("call mom").unwrap();
    assert_eq!(counts.len(), 3);
    assert!(counts.values().all(|&n| n == 1));
}

#[test]
fn test_snapshot_not_affected_by_later_updates() {
    let mut manager = TaskManager::new(1);
    manager.add_tasks(titled(&["a", "b", "c"]));

    let snapshot = manager.get_all_tasks();
    manager.update_tasks(Vec::new());

    assert_eq!(snapshot.len(), 3);
    assert!(manager.is_empty());
}

#[test]
fn test_sort_then_binary_search() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut tasks = generate_tasks(&mut rng, 20, TaskId(100), due()).unwrap();
    tasks.reverse();

    let mut manager = TaskManager::new(1);
    manager.add_tasks(tasks);
    manager.sort(SortSpec::Algorithm(SortAlgorithm::Quick));

    let snapshot = manager.get_all_tasks();
    let found = task_tracker::engine::binary_search_by_id(&snapshot, TaskId(110));
    assert_eq!(found.map(|t| t.id), Some(TaskId(110)));
    assert!(task_tracker::engine::binary_search_by_id(&snapshot, TaskId(99)).is_none());
}

#[test]
fn test_invalid_selector_leaves_state() {
    let mut manager = TaskManager::new(1);
    manager.add_tasks(titled(&["z", "a"]));

    assert!(matches!(
        manager.sort_by_selector("0"),
        Err(TrackerError::InvalidSelector(_))
    ));
    let titles: Vec<_> = manager.get_all_tasks().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["z", "a"]);
}

#[test]
fn test_empty_manager_operations() {
    let mut manager = TaskManager::new(3);
    assert!(manager.get_all_tasks().is_empty());
    assert!(manager.sort_by_selector("bubble").unwrap().is_empty());
    assert!(manager.count_occurrences("anything").unwrap().is_empty());
    manager.shutdown();
}

#[test]
fn test_file_load_sort_append() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tasks.md");

    let mut rng = StdRng::seed_from_u64(12);
    append_to_file(&path, &generate_tasks(&mut rng, 6, TaskId(1), due())?)?;

    let mut manager = TaskManager::new(2);
    manager.add_tasks(TasksFile::from_file(&path)?.into_tasks());
    let sorted = manager.sort_by_selector("priority")?;
    append_to_file(&path, &sorted)?;

    // The second batch repeats the same ids, so only the first copy loads
    let reloaded = TasksFile::from_file(&path)?;
    assert_eq!(reloaded.tasks.len(), 6);
    assert_eq!(reloaded.skipped, 6);

    manager.shutdown();
    Ok(())
}
