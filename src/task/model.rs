//! Task data model

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::TrackerError;

/// Numeric task ID, unique within a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl TaskId {
    /// Parse task ID from `12` or `#12`
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().trim_start_matches('#').parse().ok().map(Self)
    }

    pub fn is_even(&self) -> bool {
        self.0 % 2 == 0
    }

    /// The id `n` places after this one, or `None` past `u32::MAX`
    pub fn offset(self, n: usize) -> Option<Self> {
        u32::try_from(n)
            .ok()
            .and_then(|n| self.0.checked_add(n))
            .map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Parse priority from text or a menu digit (1 = low .. 4 = urgent)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Some(Self::Low),
            "medium" | "med" | "2" => Some(Self::Medium),
            "high" | "3" => Some(Self::High),
            "urgent" | "4" => Some(Self::Urgent),
            _ => None,
        }
    }

    /// Get the label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TrackerError::InvalidPriority(s.to_string()))
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label().to_uppercase())
    }
}

/// A task
///
/// Identity is the `id`: two tasks with the same id compare equal even if
/// their other fields differ.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    /// Unique task ID
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Free-form details
    pub description: String,

    /// Priority level
    pub priority: TaskPriority,

    /// Due date
    pub due: NaiveDate,
}

impl Task {
    /// Create a new task with an empty description
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        priority: TaskPriority,
        due: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority,
            due,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Format as a task file line
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "- [{}] **#{}**: {} (due: {})",
            self.priority.label(),
            self.id.0,
            self.title,
            self.due.format("%Y-%m-%d")
        );

        if !self.description.is_empty() {
            line.push_str(&format!(" | {}", self.description));
        }

        line
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} (due {})",
            self.id,
            self.priority,
            self.title,
            self.due.format("%Y-%m-%d")
        )?;
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_id() {
        assert_eq!(TaskId(42).to_string(), "#42");
        assert_eq!(TaskId::parse("42"), Some(TaskId(42)));
        assert_eq!(TaskId::parse(" #7 "), Some(TaskId(7)));
        assert!(TaskId::parse("T001").is_none());
        assert!(TaskId::parse("-3").is_none());
        assert!(TaskId(8).is_even());
        assert!(!TaskId(5).is_even());
    }

    #[test]
    fn test_task_id_offset_stops_at_max() {
        assert_eq!(TaskId(10).offset(5), Some(TaskId(15)));
        assert_eq!(TaskId(u32::MAX - 1).offset(1), Some(TaskId(u32::MAX)));
        assert_eq!(TaskId(u32::MAX).offset(0), Some(TaskId(u32::MAX)));
        assert!(TaskId(u32::MAX).offset(1).is_none());
        assert!(TaskId(1).offset(usize::MAX).is_none());
    }

    #[test]
    fn test_priority_order() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::Medium < TaskPriority::High);
        assert!(TaskPriority::High < TaskPriority::Urgent);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!(TaskPriority::parse("URGENT"), Some(TaskPriority::Urgent));
        assert_eq!(TaskPriority::parse("med"), Some(TaskPriority::Medium));
        assert_eq!(TaskPriority::parse("3"), Some(TaskPriority::High));
        assert!(TaskPriority::parse("5").is_none());
        assert!(matches!(
            "soon".parse::<TaskPriority>(),
            Err(TrackerError::InvalidPriority(_))
        ));
    }

    #[test]
    fn test_equality_is_by_id() {
        let a = Task::new(TaskId(1), "One", TaskPriority::Low, date(2026, 1, 1));
        let b = Task::new(TaskId(1), "Other", TaskPriority::High, date(2027, 1, 1));
        let c = Task::new(TaskId(2), "One", TaskPriority::Low, date(2026, 1, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_task_line() {
        let task = Task::new(TaskId(12), "Buy milk", TaskPriority::High, date(2026, 2, 15))
            .with_description("from the corner store");

        assert_eq!(
            task.to_line(),
            "- [high] **#12**: Buy milk (due: 2026-02-15) | from the corner store"
        );
        assert_eq!(
            task.to_string(),
            "#12 [HIGH] Buy milk (due 2026-02-15): from the corner store"
        );
    }

    #[test]
    fn test_task_json_shape() {
        let task = Task::new(TaskId(3), "Call dentist", TaskPriority::Urgent, date(2026, 5, 4));
        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "title": "Call dentist",
                "description": "",
                "priority": "urgent",
                "due": "2026-05-04",
            })
        );
    }
}
