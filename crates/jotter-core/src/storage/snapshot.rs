use crate::storage::codec;
use crate::task_list::TaskList;

/// The task list at one point in time, held as encoded task lines.
///
/// A plain value: it shares nothing with the list it was taken from, and two
/// snapshots are equal exactly when their encoded lines are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    lines: Vec<String>,
}

impl Snapshot {
    pub fn capture(tasks: &TaskList) -> Self {
        Self {
            lines: codec::encode_tasks(tasks),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Decodes back into a list with the same skipping rules as a file load.
    pub fn decode(&self) -> TaskList {
        codec::decode_lines(&self.lines)
    }
}

impl From<Vec<String>> for Snapshot {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
