//! File-backed implementation of the `TaskStore` contract.

pub mod line_file_store;

pub use line_file_store::LineFileStore;
