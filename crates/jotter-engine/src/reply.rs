use chrono::NaiveDate;

use crate::error::CommandError;

/// What a command produced, for the presentation layer to render.
///
/// Task entries are display strings in list order; numbering is left to the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Added { task: String, count: usize },
    Deleted { task: String, count: usize },
    Marked { task: String },
    Unmarked { task: String },
    Listed { tasks: Vec<String> },
    Found { tasks: Vec<String> },
    OnDate { date: NaiveDate, tasks: Vec<String> },
    Undone { count: usize },
    NothingToUndo,
    Bye,
    Unknown,
    Failed(CommandError),
}

/// A reply plus whether the session should end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub reply: Reply,
    pub should_exit: bool,
}

impl Response {
    pub(crate) fn stay(reply: Reply) -> Self {
        Self {
            reply,
            should_exit: false,
        }
    }

    pub(crate) fn exit() -> Self {
        Self {
            reply: Reply::Bye,
            should_exit: true,
        }
    }

    pub fn error(&self) -> Option<&CommandError> {
        match &self.reply {
            Reply::Failed(err) => Some(err),
            _ => None,
        }
    }
}
