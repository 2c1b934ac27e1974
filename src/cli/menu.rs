//! Interactive numbered menu
//!
//! Reads one answer per line from any `BufRead` and writes prompts to any
//! `Write`, so the whole loop can be driven from a script in tests.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::Config;
use crate::engine::{self, OccurrenceCounts, SortSpec};
use crate::manager::TaskManager;
use crate::task::{append_to_file, generate_tasks, Task, TaskId, TaskPriority, TasksFile};

pub struct Menu<'a, R, W> {
    manager: &'a mut TaskManager,
    config: &'a Config,
    default_file: PathBuf,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        manager: &'a mut TaskManager,
        config: &'a Config,
        default_file: &Path,
        input: R,
        output: W,
    ) -> Self {
        Self {
            manager,
            config,
            default_file: default_file.to_path_buf(),
            input,
            output,
        }
    }

    /// Run until `0` or end of input, then stop the manager's worker pool
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Task Tracker")?;
        writeln!(self.output, "============")?;

        let result = self.main_loop();
        self.manager.shutdown();
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            self.show_main_menu()?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.load_from_source()?,
                "2" => self.show_all_tasks()?,
                "3" => self.perform_sorting()?,
                "4" => self.perform_search()?,
                "5" => self.add_tasks_manually()?,
                "6" => self.perform_advanced_search()?,
                "7" => self.save_tasks()?,
                "0" => {
                    writeln!(self.output, "Shutting down...")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice, try again.")?,
            }
        }
    }

    fn show_main_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\nMAIN MENU:")?;
        writeln!(self.output, "1. Load tasks from a source")?;
        writeln!(self.output, "2. Show all tasks")?;
        writeln!(self.output, "3. Sort tasks")?;
        writeln!(self.output, "4. Search tasks")?;
        writeln!(self.output, "5. Add a task manually")?;
        writeln!(self.output, "6. Advanced search and counting")?;
        writeln!(self.output, "7. Save tasks to a file (append)")?;
        writeln!(self.output, "0. Exit")?;
        self.prompt("\nChoose an option: ")
    }

    fn load_from_source(&mut self) -> Result<()> {
        writeln!(self.output, "\nSOURCES:")?;
        writeln!(self.output, "1. Task file")?;
        writeln!(self.output, "2. Random tasks")?;
        writeln!(self.output, "3. Manual entry")?;
        self.prompt("Choose a source: ")?;

        let tasks = match self.read_line()?.as_deref() {
            Some("1") => {
                let path = self.ask_path("File path")?;
                match TasksFile::from_file(&path) {
                    Ok(file) => file.into_tasks(),
                    Err(e) => {
                        warn!("Failed to load {:?}: {:#}", path, e);
                        writeln!(self.output, "Could not read {}: {}", path.display(), e)?;
                        return Ok(());
                    }
                }
            }
            Some("2") => {
                let count = self.ask_count()?;
                let generated = self.manager.next_id().and_then(|first_id| {
                    generate_tasks(
                        &mut rand::thread_rng(),
                        count,
                        first_id,
                        Local::now().date_naive(),
                    )
                });
                match generated {
                    Ok(tasks) => tasks,
                    Err(e) => {
                        writeln!(self.output, "{}", e)?;
                        return Ok(());
                    }
                }
            }
            Some("3") => self.read_manual_tasks()?,
            _ => {
                writeln!(self.output, "Invalid source.")?;
                return Ok(());
            }
        };

        if tasks.is_empty() {
            writeln!(self.output, "No tasks loaded.")?;
        } else {
            let offered = tasks.len();
            let added = self.manager.add_tasks(tasks);
            writeln!(self.output, "Loaded {} tasks.", added)?;
            if added < offered {
                writeln!(
                    self.output,
                    "Skipped {} tasks with ids already in the list.",
                    offered - added
                )?;
            }
        }
        Ok(())
    }

    fn show_all_tasks(&mut self) -> Result<()> {
        let tasks = self.manager.get_all_tasks();
        if tasks.is_empty() {
            writeln!(self.output, "The task list is empty.")?;
            return Ok(());
        }

        writeln!(self.output, "\nALL TASKS ({}):", tasks.len())?;
        for (i, task) in tasks.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, task)?;
        }
        Ok(())
    }

    fn perform_sorting(&mut self) -> Result<()> {
        writeln!(self.output, "\nSORT MODES:")?;
        for (i, (_, label)) in SortSpec::MENU.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, label)?;
        }
        self.prompt("Choose a sort mode: ")?;

        let selector = self.read_line()?.unwrap_or_default();
        match self.manager.sort_by_selector(&selector) {
            Ok(_) => {
                writeln!(self.output, "Sorted.")?;
                self.show_all_tasks()
            }
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                Ok(())
            }
        }
    }

    fn perform_search(&mut self) -> Result<()> {
        writeln!(self.output, "\nSEARCH:")?;
        writeln!(self.output, "1. By title")?;
        writeln!(self.output, "2. By priority")?;
        writeln!(self.output, "3. Binary search by id (list must be sorted by id)")?;
        writeln!(self.output, "4. Title and description")?;
        self.prompt("Choose a search: ")?;

        let tasks = self.manager.get_all_tasks();
        match self.read_line()?.as_deref() {
            Some("1") => {
                let needle = self.ask("Title contains: ")?;
                self.display_results(&engine::search_by_title(&tasks, &needle))
            }
            Some("2") => {
                let answer = self.ask("Priority (1-LOW, 2-MEDIUM, 3-HIGH, 4-URGENT): ")?;
                match TaskPriority::parse(&answer) {
                    Some(priority) => {
                        self.display_results(&engine::search_by_priority(&tasks, priority))
                    }
                    None => {
                        writeln!(self.output, "Unknown priority '{}'.", answer)?;
                        Ok(())
                    }
                }
            }
            Some("3") => {
                let answer = self.ask("Task id: ")?;
                let Some(id) = TaskId::parse(&answer) else {
                    writeln!(self.output, "Invalid id '{}'. Enter a whole number.", answer)?;
                    return Ok(());
                };
                match engine::binary_search_by_id(&tasks, id) {
                    Some(task) => writeln!(self.output, "Found: {}", task)?,
                    None => writeln!(self.output, "No task with id {}.", id)?,
                }
                Ok(())
            }
            Some("4") => {
                let term = self.ask("Search term: ")?;
                self.display_results(&engine::search_text(&tasks, &term))
            }
            _ => {
                writeln!(self.output, "Invalid search type.")?;
                Ok(())
            }
        }
    }

    fn perform_advanced_search(&mut self) -> Result<()> {
        writeln!(self.output, "\nADVANCED:")?;
        writeln!(self.output, "1. Parallel occurrence count")?;
        writeln!(self.output, "2. Title and description search")?;
        self.prompt("Choose: ")?;

        match self.read_line()?.as_deref() {
            Some("1") => {
                let term = self.ask("Term to count: ")?;
                match self.manager.count_occurrences(&term) {
                    Ok(counts) => self.display_counts(&counts, &term),
                    Err(e) => {
                        writeln!(self.output, "{}", e)?;
                        Ok(())
                    }
                }
            }
            Some("2") => {
                let term = self.ask("Search term: ")?;
                let tasks = self.manager.get_all_tasks();
                self.display_results(&engine::search_text(&tasks, &term))
            }
            _ => {
                writeln!(self.output, "Invalid search type.")?;
                Ok(())
            }
        }
    }

    fn add_tasks_manually(&mut self) -> Result<()> {
        let tasks = self.read_manual_tasks()?;
        if tasks.is_empty() {
            writeln!(self.output, "No tasks added.")?;
            return Ok(());
        }

        let added = self.manager.add_tasks(tasks);
        writeln!(self.output, "Added {} tasks.", added)?;
        self.show_all_tasks()
    }

    fn save_tasks(&mut self) -> Result<()> {
        let path = self.ask_path("Save to")?;
        let tasks = self.manager.get_all_tasks();
        match append_to_file(&path, &tasks) {
            Ok(()) => writeln!(self.output, "Appended {} tasks to {}.", tasks.len(), path.display())?,
            Err(e) => writeln!(self.output, "Save failed: {:#}", e)?,
        }
        Ok(())
    }

    /// Prompt for tasks until an empty title
    fn read_manual_tasks(&mut self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        let mut next_id = match self.manager.next_id() {
            Ok(id) => Some(id),
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(tasks);
            }
        };

        writeln!(self.output, "Enter tasks (empty title to finish).")?;
        loop {
            let Some(id) = next_id else {
                writeln!(self.output, "No task ids left, entry stopped.")?;
                break;
            };
            let title = self.ask("Title: ")?;
            if title.is_empty() {
                break;
            }
            let description = self.ask("Description: ")?;

            let answer = self.ask("Priority (1-LOW, 2-MEDIUM, 3-HIGH, 4-URGENT) [2]: ")?;
            let priority = if answer.is_empty() {
                TaskPriority::default()
            } else {
                match TaskPriority::parse(&answer) {
                    Some(priority) => priority,
                    None => {
                        writeln!(self.output, "Unknown priority, using medium.")?;
                        TaskPriority::default()
                    }
                }
            };

            let answer = self.ask("Due date (YYYY-MM-DD) [today]: ")?;
            let due = if answer.is_empty() {
                Local::now().date_naive()
            } else {
                match NaiveDate::parse_from_str(&answer, "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(_) => {
                        writeln!(self.output, "Invalid date '{}', task skipped.", answer)?;
                        continue;
                    }
                }
            };

            tasks.push(Task::new(id, title, priority, due).with_description(description));
            next_id = id.offset(1);
        }

        Ok(tasks)
    }

    fn display_results(&mut self, results: &[Task]) -> Result<()> {
        if results.is_empty() {
            writeln!(self.output, "No matches found.")?;
            return Ok(());
        }

        writeln!(self.output, "Found {} tasks:", results.len())?;
        for task in results {
            writeln!(self.output, "- {}", task)?;
        }
        Ok(())
    }

    fn display_counts(&mut self, counts: &OccurrenceCounts, term: &str) -> Result<()> {
        if counts.is_empty() {
            writeln!(self.output, "No occurrences found.")?;
            return Ok(());
        }

        let tasks = self.manager.get_all_tasks();
        let rows = super::count::count_rows(&tasks, counts);
        writeln!(self.output, "Occurrences of '{}':", term)?;
        for row in rows {
            writeln!(self.output, "  {} {}: {}", row.id, row.title, row.count)?;
        }
        Ok(())
    }

    fn ask_path(&mut self, label: &str) -> Result<PathBuf> {
        let answer = self.ask(&format!("{} [{}]: ", label, self.default_file.display()))?;
        Ok(if answer.is_empty() {
            self.default_file.clone()
        } else {
            PathBuf::from(answer)
        })
    }

    fn ask_count(&mut self) -> Result<usize> {
        let default = self.config.generator.default_count;
        let answer = self.ask(&format!("How many tasks? [{}]: ", default))?;
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse() {
            Ok(count) => Ok(count),
            Err(_) => {
                writeln!(self.output, "Not a number, generating {}.", default)?;
                Ok(default)
            }
        }
    }

    fn ask(&mut self, message: &str) -> Result<String> {
        self.prompt(message)?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn prompt(&mut self, message: &str) -> Result<()> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    /// Next trimmed line, or `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Run the menu on stdin/stdout
pub async fn run(config: &Config, file: &Path) -> Result<()> {
    let config = config.clone();
    let file = file.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut manager = TaskManager::from_config(&config);
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        Menu::new(&mut manager, &config, &file, stdin.lock(), stdout.lock()).run()
    })
    .await?
}
