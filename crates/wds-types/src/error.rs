use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown status code: {0:?}")]
    UnknownStatusCode(char),

    #[error("porcelain entry has an empty path")]
    EmptyPath,
}
