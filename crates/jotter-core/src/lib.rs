//! Core of Jotter: date and command parsing, the task model, and the
//! persistence contract shared by the storage, engine and CLI crates.

pub mod command;
pub mod datetime;
pub mod storage;
pub mod task_list;
pub mod tasks;

pub use command::{parse_command, CommandWord, ParsedCommand};
pub use datetime::{parse_date_only, parse_date_time, parse_event_end, Moment};
pub use storage::{Snapshot, StoreError, TaskStore};
pub use task_list::{TaskList, TaskListError};
pub use tasks::{Task, TaskError, TaskKind};
