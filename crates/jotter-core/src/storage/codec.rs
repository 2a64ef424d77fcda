//! Line codec for the task file.
//!
//! ```text
//! T | <0|1> | <description>
//! D | <0|1> | <description> | <iso date or date-time>
//! E | <0|1> | <description> | <iso date or date-time> | <iso date or date-time>
//! ```
//!
//! Encoding always joins with `" | "`; decoding tolerates any whitespace
//! around the separator.

use thiserror::Error;
use tracing::{debug, warn};

use crate::datetime::{parse_iso_date_or_date_time, Moment};
use crate::task_list::TaskList;
use crate::tasks::{Task, TaskError, TaskKind, FIELD_SEPARATOR};

const JOINER: &str = " | ";

/// Why a single persisted line could not be turned back into a task.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("blank line")]
    Blank,
    #[error("unknown task type `{0}`")]
    UnknownTag(String),
    #[error("expected {expected} fields for `{tag}`, found {found}")]
    MissingFields {
        tag: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("unparsable date `{0}`")]
    BadDate(String),
    #[error(transparent)]
    InvalidTask(#[from] TaskError),
}

pub fn encode_task(task: &Task) -> String {
    let done = if task.is_done() { "1" } else { "0" };
    let dates: Vec<String> = match task.kind() {
        TaskKind::Todo => Vec::new(),
        TaskKind::Deadline { by } => vec![by.to_iso()],
        TaskKind::Event { from, to } => vec![from.to_iso(), to.to_iso()],
    };
    let mut fields = vec![tag_of(task.kind()), done, task.description()];
    fields.extend(dates.iter().map(String::as_str));
    fields.join(JOINER)
}

pub fn encode_tasks(tasks: &TaskList) -> Vec<String> {
    tasks.iter().map(encode_task).collect()
}

pub fn decode_line(line: &str) -> Result<Task, DecodeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Blank);
    }

    let parts: Vec<&str> = trimmed.split(FIELD_SEPARATOR).map(str::trim).collect();
    let done = parts.get(1).is_some_and(|flag| *flag == "1");

    let mut task = match parts[0] {
        "T" => {
            require_fields(&parts, "T", 3)?;
            Task::todo(parts[2])?
        }
        "D" => {
            require_fields(&parts, "D", 4)?;
            Task::deadline(parts[2], stored_moment(parts[3])?)?
        }
        "E" => {
            require_fields(&parts, "E", 5)?;
            Task::event(parts[2], stored_moment(parts[3])?, stored_moment(parts[4])?)?
        }
        other => return Err(DecodeError::UnknownTag(other.to_string())),
    };

    if done {
        task.mark_done();
    }
    Ok(task)
}

/// Decodes every line, skipping corrupted lines and later duplicates.
///
/// Skips are logged; they never abort the pass.
pub fn decode_lines<I, S>(lines: I) -> TaskList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tasks = TaskList::new();
    for (number, line) in lines.into_iter().enumerate() {
        accept_line(&mut tasks, number + 1, line.as_ref());
    }
    tasks
}

/// [`decode_lines`] over raw file bytes. A line that is not valid UTF-8 is
/// skipped like any other corrupted line.
pub fn decode_bytes(bytes: &[u8]) -> TaskList {
    let mut tasks = TaskList::new();
    for (number, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => accept_line(&mut tasks, number + 1, line),
            Err(err) => warn!(
                line = number + 1,
                content = %String::from_utf8_lossy(raw),
                %err,
                "skipping corrupted task line"
            ),
        }
    }
    tasks
}

fn accept_line(tasks: &mut TaskList, number: usize, line: &str) {
    match decode_line(line) {
        Ok(task) => {
            if tasks.push_unique(task).is_err() {
                warn!(line = number, content = line, "skipping duplicate task line");
            }
        }
        Err(DecodeError::Blank) => debug!(line = number, "skipping blank line"),
        Err(err) => warn!(line = number, content = line, %err, "skipping corrupted task line"),
    }
}

fn tag_of(kind: &TaskKind) -> &'static str {
    match kind {
        TaskKind::Todo => "T",
        TaskKind::Deadline { .. } => "D",
        TaskKind::Event { .. } => "E",
    }
}

fn require_fields(parts: &[&str], tag: &'static str, expected: usize) -> Result<(), DecodeError> {
    if parts.len() < expected {
        return Err(DecodeError::MissingFields {
            tag,
            expected,
            found: parts.len(),
        });
    }
    Ok(())
}

fn stored_moment(raw: &str) -> Result<Moment, DecodeError> {
    parse_iso_date_or_date_time(raw).ok_or_else(|| DecodeError::BadDate(raw.to_string()))
}
