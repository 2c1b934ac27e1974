//! Task module
//!
//! - Task record, ids and priorities
//! - Ordered collection owned by the manager
//! - Task file line format (load / append save)
//! - Random task generation

pub mod collection;
pub mod generator;
pub mod model;
pub mod parser;

pub use collection::TaskCollection;
pub use generator::generate_tasks;
pub use model::{Task, TaskId, TaskPriority};
pub use parser::{append_to_file, TasksFile};
