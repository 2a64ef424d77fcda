//! Command execution for Jotter.
//!
//! [`Engine`] owns one task list, its store and its undo history. Callers
//! feed it raw input lines and render the structured [`Reply`] it returns.

mod engine;
mod error;
mod handlers;
mod reply;
mod undo;

pub use engine::Engine;
pub use error::{CommandError, DateField};
pub use reply::{Reply, Response};
pub use undo::UndoHistory;
