use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::warn;

use crate::storage::codec;
use crate::storage::snapshot::Snapshot;
use crate::task_list::TaskList;

/// Errors produced by task store implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The backing data exists but could not be read.
    #[error("failed to read tasks from {location}: {reason}")]
    Read { location: String, reason: String },
    /// The new state could not be written.
    #[error("failed to write tasks to {location}: {reason}")]
    Write { location: String, reason: String },
}

/// Persistence contract for the task list.
///
/// `save` is always a full rewrite of the current state. Snapshots reuse the
/// line codec, so a restore goes through the same tolerant decode as a load.
pub trait TaskStore {
    /// Loads all tasks. Missing backing data is an empty list, not an error.
    fn load(&self) -> Result<TaskList, StoreError>;

    /// Replaces the persisted state with `tasks`.
    fn save(&self, tasks: &TaskList) -> Result<(), StoreError>;

    /// [`TaskStore::load`], logging any failure and falling back to an empty list.
    fn load_or_empty(&self) -> TaskList {
        self.load().unwrap_or_else(|err| {
            warn!(%err, "could not load tasks; starting with an empty list");
            TaskList::new()
        })
    }

    /// Encoded view of the in-memory list (not re-read from the store).
    fn snapshot(&self, tasks: &TaskList) -> Snapshot {
        Snapshot::capture(tasks)
    }

    /// Replaces `tasks` with the decoded snapshot, then persists it.
    ///
    /// The in-memory list is replaced even when the save fails.
    fn restore(&self, tasks: &mut TaskList, snapshot: &Snapshot) -> Result<(), StoreError> {
        tasks.replace_with(snapshot.decode());
        self.save(tasks)
    }
}

/// In-memory store keeping encoded lines, for tests and smoke runs.
///
/// Clones share the same lines, so a test can keep a handle and inspect what
/// an engine persisted.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskStore {
    lines: Arc<Mutex<Vec<String>>>,
    fail_writes: bool,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with raw lines, as if read from a hand-edited file.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(Mutex::new(lines.into_iter().map(Into::into).collect())),
            fail_writes: false,
        }
    }

    /// Makes every subsequent `save` fail, leaving stored lines untouched.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Currently stored lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

const MEMORY_LOCATION: &str = "<memory>";

impl TaskStore for InMemoryTaskStore {
    fn load(&self) -> Result<TaskList, StoreError> {
        let lines = self.lines.lock().map_err(|err| StoreError::Read {
            location: MEMORY_LOCATION.to_string(),
            reason: format!("lock poisoned: {err}"),
        })?;
        Ok(codec::decode_lines(lines.iter()))
    }

    fn save(&self, tasks: &TaskList) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write {
                location: MEMORY_LOCATION.to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        let mut lines = self.lines.lock().map_err(|err| StoreError::Write {
            location: MEMORY_LOCATION.to_string(),
            reason: format!("lock poisoned: {err}"),
        })?;
        *lines = codec::encode_tasks(tasks);
        Ok(())
    }
}
