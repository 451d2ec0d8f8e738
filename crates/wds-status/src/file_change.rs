//! Changed-file records.
//!
//! [`FileChange`] is the shared `{path, status, id}` record. The two
//! specializations embed it by value and expose it through `Deref`:
//! [`WorkingDirectoryFileChange`] adds a selection, [`CommittedFileChange`]
//! adds the commit the change belongs to.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use wds_selection::{DiffSelection, Selection, SelectionType};
use wds_types::PorcelainEntry;

use crate::app_status::AppFileStatus;
use crate::classify::classify_with_markers;
use crate::error::StatusResult;

/// A changed file: its path, how it changed, and a stable identity.
///
/// The id is computed once from `(kind, path, old_path)` and cannot be set
/// independently. Two changes with the same kind, path and old path always
/// share an id; a change of kind (e.g. `Conflicted` to `Resolved`) yields a
/// different id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawFileChange")]
pub struct FileChange {
    path: String,
    status: AppFileStatus,
    id: String,
}

/// Wire form of a [`FileChange`]. Any incoming id is ignored and re-derived.
#[derive(Deserialize)]
struct RawFileChange {
    path: String,
    status: AppFileStatus,
}

impl From<RawFileChange> for FileChange {
    fn from(raw: RawFileChange) -> Self {
        FileChange::new(raw.path, raw.status)
    }
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: AppFileStatus) -> Self {
        let path = path.into();
        let id = derive_id(&path, &status);
        Self { path, status, id }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> &AppFileStatus {
        &self.status
    }

    /// The identity key used by [`WorkingDirectoryStatus`](crate::WorkingDirectoryStatus).
    pub fn id(&self) -> &str {
        &self.id
    }
}

fn derive_id(path: &str, status: &AppFileStatus) -> String {
    let kind = status.kind();
    match status.old_path() {
        Some(old_path) => format!("{kind}+{path}+{old_path}"),
        None => format!("{kind}+{path}"),
    }
}

/// A file in the working directory together with the portion of its diff
/// selected for the next commit.
///
/// Changing the selection produces a new value; `path`, `status` and `id`
/// are carried over unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkingDirectoryFileChange<S = DiffSelection> {
    #[serde(flatten)]
    change: FileChange,
    selection: S,
}

impl<S: Selection> WorkingDirectoryFileChange<S> {
    pub fn new(path: impl Into<String>, status: AppFileStatus, selection: S) -> Self {
        Self::from_change(FileChange::new(path, status), selection)
    }

    pub fn from_change(change: FileChange, selection: S) -> Self {
        Self { change, selection }
    }

    pub fn change(&self) -> &FileChange {
        &self.change
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn selection_type(&self) -> SelectionType {
        self.selection.selection_type()
    }

    /// A copy with the whole file selected (`true`) or deselected (`false`).
    pub fn with_include_all(&self, include: bool) -> Self {
        let selection = if include {
            self.selection.with_select_all()
        } else {
            self.selection.with_select_none()
        };
        self.with_selection(selection)
    }

    /// A copy with the selection replaced wholesale.
    pub fn with_selection(&self, selection: S) -> Self {
        Self {
            change: self.change.clone(),
            selection,
        }
    }
}

impl WorkingDirectoryFileChange<DiffSelection> {
    /// Classify a porcelain entry and wrap it with a whole-file selection.
    ///
    /// `conflict_markers` is the marker count found in the file, if it was
    /// scanned; it only affects conflicted entries.
    pub fn from_entry(
        entry: &PorcelainEntry,
        include: bool,
        conflict_markers: Option<usize>,
    ) -> StatusResult<Self> {
        let status = classify_with_markers(entry, conflict_markers)?;
        Ok(Self::new(
            entry.path(),
            status,
            DiffSelection::from_initial_selection(include),
        ))
    }
}

impl<S> Deref for WorkingDirectoryFileChange<S> {
    type Target = FileChange;

    fn deref(&self) -> &FileChange {
        &self.change
    }
}

/// A file change that belongs to a commit.
///
/// Committed changes cannot be partially selected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommittedFileChange {
    #[serde(flatten)]
    change: FileChange,
    /// Resolves to the commit that introduced this change; diffs are taken
    /// against its parent.
    commitish: String,
}

impl CommittedFileChange {
    pub fn new(path: impl Into<String>, status: AppFileStatus, commitish: impl Into<String>) -> Self {
        Self {
            change: FileChange::new(path, status),
            commitish: commitish.into(),
        }
    }

    pub fn change(&self) -> &FileChange {
        &self.change
    }

    pub fn commitish(&self) -> &str {
        &self.commitish
    }
}

impl Deref for CommittedFileChange {
    type Target = FileChange;

    fn deref(&self) -> &FileChange {
        &self.change
    }
}
