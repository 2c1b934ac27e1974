//! xtask - Development tasks for task-tracker

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

use task_tracker::task::{append_to_file, generate_tasks, TaskId};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for task-tracker")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write docs/cli/reference.md from the clap definitions
    GenDocs,

    /// Write a reproducible sample task file for manual testing
    GenSample {
        /// Number of tasks
        #[arg(default_value_t = 25)]
        count: usize,

        /// RNG seed
        #[arg(long, default_value_t = 2026)]
        seed: u64,

        /// Output file (replaced if it exists)
        #[arg(long, default_value = "docs/sample-tasks.md")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Commands::GenDocs => generate_cli_docs(),
        Commands::GenSample { count, seed, out } => generate_sample(count, seed, &out),
    }
}

fn generate_cli_docs() -> Result<()> {
    let markdown = clap_markdown::help_markdown::<task_tracker::cli::Cli>();
    let output_path = Path::new("docs/cli/reference.md");
    write_fresh(output_path, &markdown)?;
    println!("Generated CLI documentation at {}", output_path.display());
    Ok(())
}

fn generate_sample(count: usize, seed: u64, out: &Path) -> Result<()> {
    // Fixed date so the same seed always yields the same file
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).context("invalid start date")?;
    let tasks = generate_tasks(&mut StdRng::seed_from_u64(seed), count, TaskId(1), start)?;

    write_fresh(out, "# Sample tasks\n\n")?;
    append_to_file(out, &tasks)?;
    println!("Wrote {} tasks to {}", tasks.len(), out.display());
    Ok(())
}

fn write_fresh(path: &Path, content: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
