//! `tracker generate` command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::task::{append_to_file, generate_tasks};

#[derive(Args)]
pub struct GenerateArgs {
    /// Number of tasks (defaults to generator.default_count in the config)
    count: Option<usize>,

    /// Append the generated tasks to this file
    #[arg(long)]
    save: Option<PathBuf>,
}

pub async fn run(config: &Config, file: &Path, args: GenerateArgs) -> Result<()> {
    let count = args.count.unwrap_or(config.generator.default_count);

    // Continue numbering after whatever the task file already holds
    let first_id = super::load_without_counter(file)?.next_id()?;

    let tasks = generate_tasks(
        &mut rand::thread_rng(),
        count,
        first_id,
        Local::now().date_naive(),
    )?;

    if tasks.is_empty() {
        println!("Nothing to generate.");
        return Ok(());
    }

    super::print_table(&tasks);

    if let Some(path) = &args.save {
        append_to_file(path, &tasks)?;
        println!("\nAppended {} tasks to {}", tasks.len(), path.display());
    }

    Ok(())
}
