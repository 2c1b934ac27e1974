//! `tracker sort` command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::engine::SortSpec;
use crate::task::append_to_file;

#[derive(Args)]
pub struct SortArgs {
    /// Sort mode: priority, date, title, quick, bubble, merge, parity, id (or 1-7)
    selector: String,

    /// Append the sorted tasks to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(file: &Path, args: SortArgs) -> Result<()> {
    // Validate before loading anything
    let spec: SortSpec = args.selector.parse()?;

    let mut manager = super::load_without_counter(file)?;
    let sorted = manager.sort(spec);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else if sorted.is_empty() {
        println!("No tasks to sort.");
    } else {
        println!("Sorted {} tasks ({}):\n", sorted.len(), spec);
        super::print_table(&sorted);
    }

    if let Some(path) = &args.save {
        append_to_file(path, &sorted)?;
        println!("\nAppended {} tasks to {}", sorted.len(), path.display());
    }

    Ok(())
}
