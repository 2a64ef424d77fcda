//! Ordered task collection with 1-based user positions and duplicate checks.

use thiserror::Error;

use crate::tasks::Task;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskListError {
    /// Another task already has the same duplicate key.
    #[error("task already exists: {description}")]
    Duplicate { description: String },
    #[error("no task at position {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Ordered tasks. Positions are 0-based here; users see 1-based numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Maps a user-facing 1-based number to a position, if it is in range.
    pub fn position_of(&self, number: i64) -> Option<usize> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        (index < self.tasks.len()).then_some(index)
    }

    /// The one duplicate predicate: used for add-time checks and for every
    /// decode pass over persisted lines.
    pub fn contains_duplicate_of(&self, task: &Task) -> bool {
        let key = task.duplicate_key();
        self.tasks.iter().any(|t| t.duplicate_key() == key)
    }

    /// Appends `task` unless a duplicate is present. Returns the new length.
    pub fn push_unique(&mut self, task: Task) -> Result<usize, TaskListError> {
        if self.contains_duplicate_of(&task) {
            return Err(TaskListError::Duplicate {
                description: task.description().to_string(),
            });
        }
        self.tasks.push(task);
        Ok(self.tasks.len())
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, TaskListError> {
        self.check(index)?;
        Ok(self.tasks.remove(index))
    }

    pub fn mark_done(&mut self, index: usize) -> Result<&Task, TaskListError> {
        self.check(index)?;
        let task = &mut self.tasks[index];
        task.mark_done();
        Ok(task)
    }

    pub fn mark_not_done(&mut self, index: usize) -> Result<&Task, TaskListError> {
        self.check(index)?;
        let task = &mut self.tasks[index];
        task.mark_not_done();
        Ok(task)
    }

    /// Swaps in the full contents of `other` (undo restore).
    pub fn replace_with(&mut self, other: TaskList) {
        self.tasks = other.tasks;
    }

    fn check(&self, index: usize) -> Result<(), TaskListError> {
        if index >= self.tasks.len() {
            return Err(TaskListError::OutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
