//! Sort, search and count engine
//!
//! Everything here works on a snapshot slice handed in by the caller and
//! returns freshly built results.

pub mod counter;
pub mod search;
pub mod sort;

pub use counter::{OccurrenceCounter, OccurrenceCounts};
pub use search::{binary_search_by_id, search_by_priority, search_by_title, search_text};
pub use sort::{sort_by_selector, sort_tasks, SortAlgorithm, SortKey, SortSpec};
