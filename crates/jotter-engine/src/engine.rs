use jotter_core::{parse_command, CommandWord, ParsedCommand, TaskList, TaskStore};
use tracing::{debug, instrument, warn};

use crate::error::CommandError;
use crate::handlers;
use crate::reply::{Reply, Response};
use crate::undo::UndoHistory;

/// One session: a task list, the store it persists to, and its undo history.
///
/// Nothing is shared between engines, so tests can run several side by side.
pub struct Engine<S: TaskStore> {
    store: S,
    tasks: TaskList,
    history: UndoHistory,
}

impl<S: TaskStore> Engine<S> {
    /// Loads the task list from `store`, starting empty if that fails.
    pub fn open(store: S) -> Self {
        let tasks = store.load_or_empty();
        debug!(count = tasks.len(), "engine opened");
        Self {
            store,
            tasks,
            history: UndoHistory::new(),
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Parses and runs one input line.
    #[instrument(skip(self))]
    pub fn execute(&mut self, line: &str) -> Response {
        let parsed = parse_command(line);
        match parsed.command {
            CommandWord::Bye => return Response::exit(),
            CommandWord::Undo => return Response::stay(self.undo()),
            _ => {}
        }

        Response::stay(self.run_handler(&parsed, handlers::run))
    }

    /// Runs `handler` with an undo checkpoint around mutating commands.
    ///
    /// On a non-[`CommandError`] failure the list is rolled back to the
    /// checkpoint and nothing is recorded.
    fn run_handler<H>(&mut self, parsed: &ParsedCommand, handler: H) -> Reply
    where
        H: FnOnce(&ParsedCommand, &mut TaskList) -> anyhow::Result<Reply>,
    {
        let before = parsed
            .command
            .is_mutating()
            .then(|| self.store.snapshot(&self.tasks));

        match handler(parsed, &mut self.tasks) {
            Ok(reply) => {
                if let Some(before) = before {
                    let after = self.store.snapshot(&self.tasks);
                    if self.history.record(before, &after) {
                        self.persist();
                    }
                }
                reply
            }
            Err(err) => match err.downcast::<CommandError>() {
                Ok(rejected) => {
                    debug!(%rejected, "command rejected");
                    Reply::Failed(rejected)
                }
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "command failed");
                    if let Some(before) = before {
                        self.tasks.replace_with(before.decode());
                    }
                    Reply::Failed(CommandError::Internal(err.to_string()))
                }
            },
        }
    }

    fn undo(&mut self) -> Reply {
        let Some(snapshot) = self.history.pop() else {
            return Reply::NothingToUndo;
        };
        if let Err(err) = self.store.restore(&mut self.tasks, &snapshot) {
            warn!(%err, "undo applied in memory but not saved");
        }
        Reply::Undone {
            count: self.tasks.len(),
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.tasks) {
            warn!(%err, "tasks changed in memory but not saved");
        }
    }
}
