//! `tracker search` command implementation

use anyhow::{anyhow, Result};
use clap::Subcommand;
use std::path::Path;

use crate::engine::{self, SortAlgorithm, SortSpec};
use crate::task::{Task, TaskId, TaskPriority};

#[derive(Subcommand)]
pub enum SearchCommands {
    /// Case-insensitive substring match on titles
    Title {
        /// Text to look for (empty matches everything)
        #[arg(default_value = "")]
        needle: String,
    },

    /// Exact priority match
    Priority {
        /// low, medium, high, urgent (or 1-4)
        priority: TaskPriority,
    },

    /// Binary search by id (tasks are merge-sorted by id first)
    Id {
        /// Task id, e.g. 12 or #12
        id: String,
    },

    /// Case-insensitive match on titles and descriptions
    Text {
        /// Text to look for (empty matches everything)
        #[arg(default_value = "")]
        term: String,
    },
}

pub async fn run(file: &Path, command: SearchCommands) -> Result<()> {
    let tasks = super::load_without_counter(file)?.get_all_tasks();

    match command {
        SearchCommands::Title { needle } => {
            print_results(&engine::search_by_title(&tasks, &needle));
        }
        SearchCommands::Priority { priority } => {
            print_results(&engine::search_by_priority(&tasks, priority));
        }
        SearchCommands::Id { id } => {
            let id = TaskId::parse(&id).ok_or_else(|| anyhow!("Invalid task id: {}", id))?;
            let sorted = engine::sort_tasks(&tasks, SortSpec::Algorithm(SortAlgorithm::Merge));
            match engine::binary_search_by_id(&sorted, id) {
                Some(task) => println!("Found: {}", task),
                None => println!("No task with id {}", id),
            }
        }
        SearchCommands::Text { term } => {
            print_results(&engine::search_text(&tasks, &term));
        }
    }

    Ok(())
}

fn print_results(results: &[Task]) {
    if results.is_empty() {
        println!("No matches found");
        return;
    }

    println!("Found {} tasks:\n", results.len());
    super::print_table(results);
}
