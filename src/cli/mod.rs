//! CLI command implementations

pub mod count;
pub mod definition;
pub mod generate;
pub mod list;
pub mod menu;
pub mod search;
pub mod sort;

pub use definition::{Cli, Commands};

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::manager::TaskManager;
use crate::task::{Task, TasksFile};

/// Build a manager and load `path` into it. A missing file gives an empty
/// manager.
pub fn load_manager(config: &Config, path: &Path) -> Result<TaskManager> {
    load_into(TaskManager::from_config(config), path)
}

/// Like [`load_manager`], without starting a counting pool
pub fn load_without_counter(path: &Path) -> Result<TaskManager> {
    load_into(TaskManager::without_counter(), path)
}

fn load_into(mut manager: TaskManager, path: &Path) -> Result<TaskManager> {
    if path.exists() {
        let file = TasksFile::from_file(path)?;
        manager.add_tasks(file.into_tasks());
    } else {
        info!("No task file at {:?}, starting empty", path);
    }

    Ok(manager)
}

const TABLE_COL_ID: usize = 6;
const TABLE_COL_PRIORITY: usize = 8;
const TABLE_COL_DUE: usize = 10;
const TABLE_COL_TITLE: usize = 30;

pub fn print_table(tasks: &[Task]) {
    println!(
        "{:<width_id$} {:<width_priority$} {:<width_due$} {:<width_title$} DESCRIPTION",
        "ID",
        "PRIORITY",
        "DUE",
        "TITLE",
        width_id = TABLE_COL_ID,
        width_priority = TABLE_COL_PRIORITY,
        width_due = TABLE_COL_DUE,
        width_title = TABLE_COL_TITLE
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_ID + TABLE_COL_PRIORITY + TABLE_COL_DUE + TABLE_COL_TITLE + 16)
    );

    for task in tasks {
        println!(
            "{:<width_id$} {:<width_priority$} {:<width_due$} {:<width_title$} {}",
            task.id.to_string(),
            task.priority.label(),
            task.due.format("%Y-%m-%d").to_string(),
            truncate(&task.title, TABLE_COL_TITLE),
            task.description,
            width_id = TABLE_COL_ID,
            width_priority = TABLE_COL_PRIORITY,
            width_due = TABLE_COL_DUE,
            width_title = TABLE_COL_TITLE
        );
    }
}

/// Shorten to at most `max` characters, marking the cut with `...`
pub fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        s.to_string()
    } else if max <= 3 {
        s.chars().take(max).collect()
    } else {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    }
}
