use std::fmt;

use jotter_core::TaskError;
use thiserror::Error;

const DATE_TIME_HINT: &str =
    "Try: yyyy-MM-dd (e.g., 2019-10-15) or d/M/yyyy HHmm (e.g., 2/12/2019 1800)";
const EVENT_END_HINT: &str = "Try: yyyy-MM-dd (e.g., 2019-10-15), d/M/yyyy HHmm (e.g., 2/12/2019 1800), or time-only HHmm/HH:mm (e.g., 1600)";
const DATE_ONLY_HINT: &str = "Try: yyyy-MM-dd (e.g., 2019-10-15) or d/M/yyyy (e.g., 2/12/2019)";

/// Which user-supplied date expression failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Deadline,
    EventStart,
    EventEnd,
    On,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateField::Deadline => "that date/time",
            DateField::EventStart => "the event start date/time",
            DateField::EventEnd => "the event end date/time",
            DateField::On => "that date",
        };
        f.write_str(label)
    }
}

/// A rejected command. None of these leave the task list modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please provide a description for a todo (e.g., \"todo borrow book\").")]
    MissingDescription,
    #[error("Please use: deadline <description> /by <by> (e.g., \"deadline return book /by 2019-10-15\").")]
    DeadlineUsage,
    #[error("Please use: event <description> /from <from> /to <to> (e.g., \"event project meeting /from 2019-10-15 1400 /to 1600\").")]
    EventUsage,
    #[error("Please provide a keyword to search (e.g., \"find book\").")]
    MissingKeyword,
    #[error("Please provide a date (e.g., \"on 2019-10-15\" or \"on 2/12/2019\").")]
    MissingDate,
    #[error("Please provide a valid task number to {verb} (e.g., \"{verb} 2\").")]
    InvalidIndex { verb: &'static str },
    #[error("I couldn't understand {field}.")]
    BadDate { field: DateField, raw: String },
    #[error("The event end must not be before the start.")]
    EndBeforeStart,
    #[error("That exact task is already in your list: {description}")]
    Duplicate { description: String },
    #[error("That task can't be saved: {0}.")]
    InvalidTask(#[from] TaskError),
    #[error("Something went wrong while running that command: {0}")]
    Internal(String),
}

impl CommandError {
    /// Second line shown under the message, if the error has one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CommandError::BadDate { field, .. } => Some(match field {
                DateField::Deadline | DateField::EventStart => DATE_TIME_HINT,
                DateField::EventEnd => EVENT_END_HINT,
                DateField::On => DATE_ONLY_HINT,
            }),
            _ => None,
        }
    }
}
