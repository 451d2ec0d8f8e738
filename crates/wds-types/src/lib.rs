//! Foundation types for working directory status.
//!
//! This crate holds the raw shapes reported by the version-control tool
//! before the application classifies them. Every other `wds` crate depends
//! on `wds-types`.
//!
//! # Key Types
//!
//! - [`StatusEntryCode`] — Single-character status code (modified, added, ...)
//! - [`PorcelainEntry`] — One raw status line in one of four shapes
//! - [`ConflictEntry`] — The us/them code pair of an unmerged path

pub mod code;
pub mod entry;
pub mod error;

pub use code::StatusEntryCode;
pub use entry::{ConflictEntry, PorcelainEntry};
pub use error::TypeError;
