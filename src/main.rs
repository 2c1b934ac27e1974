//! Task Tracker - in-memory task list manager

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use task_tracker::cli::{self, Cli, Commands};
use task_tracker::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASK_TRACKER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("task_tracker=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    // Completions don't need the config or the task file
    if let Some(Commands::Completion { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "tracker", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let file = cli
        .file
        .clone()
        .unwrap_or_else(|| config.storage.tasks_file.clone());

    match cli.command {
        Some(Commands::List(args)) => cli::list::run(&file, args).await,
        Some(Commands::Sort(args)) => cli::sort::run(&file, args).await,
        Some(Commands::Search { command }) => cli::search::run(&file, command).await,
        Some(Commands::Count(args)) => cli::count::run(&config, &file, args).await,
        Some(Commands::Generate(args)) => cli::generate::run(&config, &file, args).await,
        None => cli::menu::run(&config, &file).await,
        Some(Commands::Completion { .. }) => unreachable!(),
    }
}
