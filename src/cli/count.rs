//! `tracker count` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::engine::OccurrenceCounts;
use crate::task::{Task, TaskId};

#[derive(Args)]
pub struct CountArgs {
    /// Term to count (case-insensitive)
    term: String,

    /// Worker threads (defaults to counter.workers in the config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CountRow {
    pub id: TaskId,
    pub title: String,
    pub count: usize,
}

/// Join counts back to their tasks, ordered by id
pub fn count_rows(tasks: &[Task], counts: &OccurrenceCounts) -> Vec<CountRow> {
    let mut rows: Vec<CountRow> = tasks
        .iter()
        .filter_map(|task| {
            counts.get(&task.id).map(|&count| CountRow {
                id: task.id,
                title: task.title.clone(),
                count,
            })
        })
        .collect();
    rows.sort_by_key(|row| row.id);
    rows
}

pub async fn run(config: &Config, file: &Path, args: CountArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(workers) = args.workers {
        config.counter.workers = workers;
    }

    let mut manager = super::load_manager(&config, file)?;
    let counts = manager.count_occurrences(&args.term);
    let tasks = manager.get_all_tasks();
    manager.shutdown();

    let rows = count_rows(&tasks, &counts?);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No occurrences of '{}' found", args.term);
        return Ok(());
    }

    println!("Occurrences of '{}':", args.term);
    for row in &rows {
        println!(
            "  {} {}: {}",
            row.id,
            super::truncate(&row.title, 40),
            row.count
        );
    }
    Ok(())
}
