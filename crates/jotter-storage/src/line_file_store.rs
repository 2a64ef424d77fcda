use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use jotter_core::storage::{codec, StoreError, TaskStore};
use jotter_core::TaskList;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Plain-text task file, one encoded task per line.
///
/// Saves rewrite the whole file through a temp file in the same directory, so
/// readers see either the old or the new contents.
#[derive(Debug, Clone)]
pub struct LineFileStore {
    path: PathBuf,
}

impl LineFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_err(&self, err: io::Error) -> StoreError {
        StoreError::Read {
            location: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }

    fn write_err(&self, err: impl ToString) -> StoreError {
        StoreError::Write {
            location: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl TaskStore for LineFileStore {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn load(&self) -> Result<TaskList, StoreError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("task file missing; starting empty");
                return Ok(TaskList::new());
            }
            Err(err) => return Err(self.read_err(err)),
        };
        let tasks = codec::decode_bytes(&contents);
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    #[instrument(skip_all, fields(path = %self.path.display(), count = tasks.len()))]
    fn save(&self, tasks: &TaskList) -> Result<(), StoreError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| self.write_err(e))?;

        let mut body = String::new();
        for line in codec::encode_tasks(tasks) {
            body.push_str(&line);
            body.push('\n');
        }

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| self.write_err(e))?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| self.write_err(e))?;
        tmp.flush().map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_err(e.error))?;
        Ok(())
    }
}
