//! `tracker list` command implementation

use anyhow::Result;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(file: &Path, args: ListArgs) -> Result<()> {
    let tasks = super::load_without_counter(file)?.get_all_tasks();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks found in {:?}.", file);
        return Ok(());
    }

    super::print_table(&tasks);
    println!("\nTotal: {} tasks", tasks.len());
    Ok(())
}
