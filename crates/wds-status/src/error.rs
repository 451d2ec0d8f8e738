//! Error types for the status crate.

/// Errors that can occur while classifying entries or building a status.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// Two files share an id and the config rejects duplicates.
    #[error("duplicate file id {id} at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    /// A rename or copy entry arrived without its original path.
    #[error("renamed or copied entry has no old path: {path}")]
    MissingOldPath { path: String },

    /// A rename or copy entry whose old path equals its new path.
    #[error("renamed or copied entry points at itself: {path}")]
    SelfRename { path: String },

    /// An ordinary entry whose codes describe no change at all.
    #[error("entry carries no change: {0}")]
    UnchangedEntry(String),

    /// The raw entry itself is malformed.
    #[error("invalid entry: {0}")]
    InvalidEntry(#[from] wds_types::TypeError),

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error while reading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for status results.
pub type StatusResult<T> = Result<T, StatusError>;
