use std::fmt;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::datetime::format_human;

/// The three kinds of task, with whatever time fields each one carries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TaskKind {
    /// A plain to-do with no time attached.
    Todo,
    /// Something that has to be done before `by`.
    Deadline { by: NaiveDateTime },
    /// Something that happens between `from` and `to`.
    Event { from: NaiveDateTime, to: NaiveDateTime },
}

impl TaskKind {
    /// Single-letter code used both on screen and in the data file.
    pub fn code(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

/// Represents a single task in the list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// What the task is about. Never blank.
    pub description: String,
    /// Whether the task has been completed.
    #[serde(default)]
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Task {
        Task::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: impl Into<String>, by: NaiveDateTime) -> Task {
        Task::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: impl Into<String>, from: NaiveDateTime, to: NaiveDateTime) -> Task {
        Task::new(description, TaskKind::Event { from, to })
    }

    fn new(description: impl Into<String>, kind: TaskKind) -> Task {
        let description = description.into();
        debug_assert!(!description.trim().is_empty(), "task description must not be blank");
        Task { description, done: false, kind }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    pub fn status_icon(&self) -> char {
        if self.done { 'X' } else { ' ' }
    }

    /// Human-readable time fields, e.g. `by: Dec 31 2025`. Empty for todos.
    pub fn when(&self) -> String {
        match &self.kind {
            TaskKind::Todo => String::new(),
            TaskKind::Deadline { by } => format!("by: {}", format_human(by)),
            TaskKind::Event { from, to } => {
                format!("from: {} to: {}", format_human(from), format_human(to))
            }
        }
    }

    /// Two tasks are duplicates when they have the same kind and time fields
    /// and their descriptions match ignoring case. Completion state is ignored.
    pub fn is_duplicate_of(&self, other: &Task) -> bool {
        self.kind == other.kind && self.description.to_lowercase() == other.description.to_lowercase()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}] {}", self.kind.code(), self.status_icon(), self.description)?;
        match self.kind {
            TaskKind::Todo => Ok(()),
            _ => write!(f, " ({})", self.when()),
        }
    }
}
