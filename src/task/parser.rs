//! Task file parser and append writer
//!
//! One task per line:
//!
//! ```text
//! - [high] **#12**: Buy milk (due: 2026-02-15) | from the corner store
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use super::model::{Task, TaskId, TaskPriority};

static TASK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-\s+\[(\w+)\]\s+\*\*#(\d+)\*\*:\s+(.+?)\s+\(due:\s+(\d{4}-\d{2}-\d{2})\)(?:\s+\|\s+(.*))?$",
    )
    .expect("task line regex is valid")
});

/// Tasks read from a task file, in file order
#[derive(Debug, Clone, Default)]
pub struct TasksFile {
    pub tasks: Vec<Task>,

    /// Lines that looked like content but could not be read as a task
    pub skipped: usize,
}

impl TasksFile {
    /// Parse a task file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tasks from {:?}", path))?;
        let file = Self::parse(&content);
        info!(
            "Loaded {} tasks from {:?} ({} lines skipped)",
            file.tasks.len(),
            path,
            file.skipped
        );
        Ok(file)
    }

    /// Parse task file content. Never fails: unreadable lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut tasks = Vec::new();
        let mut seen = HashSet::new();
        let mut skipped = 0;

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(task) = parse_line(line) else {
                debug!("Skipping line {}: not a task line", index + 1);
                skipped += 1;
                continue;
            };

            if !seen.insert(task.id) {
                warn!("Skipping line {}: duplicate id {}", index + 1, task.id);
                skipped += 1;
                continue;
            }

            tasks.push(task);
        }

        Self { tasks, skipped }
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

fn parse_line(line: &str) -> Option<Task> {
    let caps = TASK_LINE_RE.captures(line)?;

    let priority = TaskPriority::parse(&caps[1])?;
    let id = TaskId(caps[2].parse().ok()?);
    let title = caps[3].trim();
    let due = NaiveDate::parse_from_str(&caps[4], "%Y-%m-%d").ok()?;
    let description = caps.get(5).map(|m| m.as_str().trim()).unwrap_or_default();

    Some(Task::new(id, title, priority, due).with_description(description))
}

/// Append tasks to a file, creating it if needed
pub fn append_to_file(path: &Path, tasks: &[Task]) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {:?} for append", path))?;

    let mut content = String::new();
    for task in tasks {
        content.push_str(&task.to_line());
        content.push('\n');
    }

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {:?}", path))?;

    info!("Appended {} tasks to {:?}", tasks.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TASKS: &str = r#"# Tasks

- [high] **#1**: Implement feature X (due: 2026-02-15) | needs review
- [low] **#2**: Review PR (due: 2026-02-10)

some stray note
- [someday] **#3**: Bad priority (due: 2026-02-10)
- [urgent] **#4**: Fix (due: soon) (due: 2026-01-31)
- [medium] **#2**: Duplicate id (due: 2026-02-11)
"#;

    #[test]
    fn test_parse_tasks() {
        let file = TasksFile::parse(SAMPLE_TASKS);

        assert_eq!(file.tasks.len(), 3);
        assert_eq!(file.skipped, 3);

        let task1 = &file.tasks[0];
        assert_eq!(task1.id, TaskId(1));
        assert_eq!(task1.title, "Implement feature X");
        assert_eq!(task1.priority, TaskPriority::High);
        assert_eq!(task1.description, "needs review");
        assert_eq!(task1.due, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());

        assert_eq!(file.tasks[1].description, "");
        assert_eq!(file.tasks[2].title, "Fix (due: soon)");
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let file = TasksFile::parse(SAMPLE_TASKS);
        let review = file.tasks.iter().find(|t| t.id == TaskId(2)).unwrap();
        assert_eq!(review.title, "Review PR");
    }

    #[test]
    fn test_parse_empty() {
        let file = TasksFile::parse("");
        assert!(file.tasks.is_empty());
        assert_eq!(file.skipped, 0);
    }

    #[test]
    fn test_task_line_reads_back() {
        let task = Task::new(
            TaskId(7),
            "Plan trip",
            TaskPriority::Urgent,
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        )
        .with_description("book | hotel");

        let file = TasksFile::parse(&task.to_line());
        assert_eq!(file.tasks.len(), 1);
        assert_eq!(file.tasks[0].title, "Plan trip");
        assert_eq!(file.tasks[0].description, "book | hotel");
        assert_eq!(file.tasks[0].priority, TaskPriority::Urgent);
    }

    #[test]
    fn test_append_to_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tasks.md");
        let due = NaiveDate::from_ymd_opt(2026, 5, 5).unwrap();

        append_to_file(&path, &[Task::new(TaskId(1), "a", TaskPriority::Low, due)])?;
        append_to_file(&path, &[Task::new(TaskId(2), "b", TaskPriority::High, due)])?;

        let file = TasksFile::from_file(&path)?;
        let ids: Vec<_> = file.tasks.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        Ok(())
    }

    #[test]
    fn test_from_missing_file_is_error() {
        let result = TasksFile::from_file(Path::new("/nonexistent/tasks.md"));
        assert!(result.is_err());
    }
}
