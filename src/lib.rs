//! Task Tracker library - in-memory task list with sort, search and count engines

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod manager;
pub mod task;

pub use error::{Result, TrackerError};
pub use manager::TaskManager;
