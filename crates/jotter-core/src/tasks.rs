//! Task entity: todo, deadline and event variants, their display strings
//! and the duplicate key.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::datetime::{date_in_range, Moment};

/// Field separator of the task file; never allowed inside a description.
pub const FIELD_SEPARATOR: char = '|';

/// Reasons a task cannot be constructed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("task description must not be blank")]
    BlankDescription,
    #[error("task description must not contain `|`")]
    ReservedSeparator,
    #[error("event end must not be before its start")]
    EndBeforeStart,
}

/// Variant-specific payload of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { by: Moment },
    Event { from: Moment, to: Moment },
}

impl TaskKind {
    fn tag(&self) -> &'static str {
        match self {
            TaskKind::Todo => "todo",
            TaskKind::Deadline { .. } => "deadline",
            TaskKind::Event { .. } => "event",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            TaskKind::Todo => "[T]",
            TaskKind::Deadline { .. } => "[D]",
            TaskKind::Event { .. } => "[E]",
        }
    }
}

/// Canonical identity of a task's details, ignoring its done flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey(String);

impl DuplicateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Task entity. The description is trimmed and fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    pub fn todo(description: &str) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: &str, by: Moment) -> Result<Self, TaskError> {
        Self::new(description, TaskKind::Deadline { by })
    }

    /// Fails with [`TaskError::EndBeforeStart`] when `to` precedes `from`.
    pub fn event(description: &str, from: Moment, to: Moment) -> Result<Self, TaskError> {
        if to.at < from.at {
            return Err(TaskError::EndBeforeStart);
        }
        Self::new(description, TaskKind::Event { from, to })
    }

    fn new(description: &str, kind: TaskKind) -> Result<Self, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::BlankDescription);
        }
        if description.contains(FIELD_SEPARATOR) {
            return Err(TaskError::ReservedSeparator);
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    fn status_icon(&self) -> &'static str {
        if self.done {
            "[X]"
        } else {
            "[ ]"
        }
    }

    /// e.g. `[D][ ] return book (by: Oct 15 2019)`.
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Variant tag, trimmed description and canonical dates with their
    /// has-time flags. Two tasks with equal keys are duplicates.
    pub fn duplicate_key(&self) -> DuplicateKey {
        let mut key = format!("{}|{}", self.kind.tag(), self.description);
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => {
                key.push_str(&format!("|{}|{}", by.to_iso(), by.has_time));
            }
            TaskKind::Event { from, to } => {
                key.push_str(&format!(
                    "|{}|{}|{}|{}",
                    from.to_iso(),
                    from.has_time,
                    to.to_iso(),
                    to.has_time
                ));
            }
        }
        DuplicateKey(key)
    }

    pub fn is_duplicate_of(&self, other: &Task) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }

    /// Deadlines due on `date`, or events whose calendar span covers it.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match &self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { by } => by.date() == date,
            TaskKind::Event { from, to } => date_in_range(date, from.date(), to.date()),
        }
    }

    /// Case-insensitive substring match on the description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            self.kind.icon(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by.to_display()),
            TaskKind::Event { from, to } => {
                let end = if from.has_time && to.has_time && from.date() == to.date() {
                    to.to_display_time()
                } else {
                    to.to_display()
                };
                write!(f, " (from: {} to: {})", from.to_display(), end)
            }
        }
    }
}
