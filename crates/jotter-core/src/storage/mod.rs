//! Task persistence contract, line codec and undo snapshots.

pub mod codec;
mod snapshot;
mod task_store;

pub use snapshot::Snapshot;
pub use task_store::{InMemoryTaskStore, StoreError, TaskStore};
