//! Diff selection for working directory status.
//!
//! A selection records which lines of a file's diff are included in the next
//! commit. Selections are immutable values: every `with_*` method returns a
//! new selection.
//!
//! # Key Types
//!
//! - [`Selection`] — The contract the status model relies on
//! - [`SelectionType`] — All / None / Partial
//! - [`DiffSelection`] — Line-granular selection over a rendered diff
//! - [`DiffLines`] / [`DiffLine`] — Flattened diff with selectable line indices

pub mod diff;
pub mod error;
pub mod selection;

pub use diff::{diff_lines, DiffLine, DiffLines};
pub use error::{SelectionError, SelectionResult};
pub use selection::{DiffSelection, Selection, SelectionType};
