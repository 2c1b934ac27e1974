//! CLI argument definitions

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::count::CountArgs;
use super::generate::GenerateArgs;
use super::list::ListArgs;
use super::search::SearchCommands;
use super::sort::SortArgs;

#[derive(Parser)]
#[command(name = "tracker")]
#[command(version)]
#[command(about = "In-memory task list manager: load, sort, search and count tasks")]
#[command(
    long_about = "Loads tasks from a task file, then sorts, searches or counts term occurrences.\n\
                  Run without a subcommand for the interactive menu."
)]
pub struct Cli {
    /// Task file to load (defaults to storage.tasks_file in the config)
    #[arg(short, long, global = true, env = "TASK_TRACKER_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in file order
    List(ListArgs),

    /// Sort tasks with one of the seven sort modes
    Sort(SortArgs),

    /// Search tasks
    Search {
        #[command(subcommand)]
        command: SearchCommands,
    },

    /// Count occurrences of a term per task (parallel)
    Count(CountArgs),

    /// Generate random tasks
    Generate(GenerateArgs),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
