//! Error types for the selection crate.

/// Errors that can occur during checked selection updates.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The line is not an added or removed line of the diff.
    #[error("line {0} is not selectable")]
    LineNotSelectable(usize),
}

/// Convenience alias for selection results.
pub type SelectionResult<T> = Result<T, SelectionError>;
