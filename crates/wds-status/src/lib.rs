//! Working directory status model.
//!
//! Classifies raw porcelain entries into application-level file statuses,
//! pairs each changed file with a diff selection, and aggregates them into a
//! [`WorkingDirectoryStatus`] with a tri-state "include all" flag.
//!
//! Every type here is an immutable value. Updates construct new values, so a
//! refreshed status can be swapped in atomically by the caller.
//!
//! # Key Types
//!
//! - [`AppFileStatus`] — How a file changed (New, Modified, Renamed, ...)
//! - [`FileChange`] — Path + status with a derived, stable id
//! - [`WorkingDirectoryFileChange`] — A file change with a selection
//! - [`CommittedFileChange`] — A file change belonging to a commit
//! - [`WorkingDirectoryStatus`] — Ordered files, id index, include-all flag
//! - [`StatusConfig`] — Duplicate-id policy and initial selection

pub mod app_status;
pub mod classify;
pub mod config;
pub mod error;
pub mod file_change;
pub mod working_directory;

pub use app_status::{AppFileStatus, AppFileStatusKind, ConflictStatus};
pub use classify::{classify, classify_with_markers};
pub use config::{DuplicateIdPolicy, InitialSelection, StatusConfig};
pub use error::{StatusError, StatusResult};
pub use file_change::{CommittedFileChange, FileChange, WorkingDirectoryFileChange};
pub use working_directory::{get_include_all_state, WorkingDirectoryStatus};
