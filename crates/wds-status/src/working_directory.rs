//! The working directory status aggregate.
//!
//! A [`WorkingDirectoryStatus`] is built once from a file list and never
//! patched. Any change to the file list, or to a file's selection, produces
//! a new aggregate with a freshly built id index.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};
use wds_selection::{DiffSelection, Selection, SelectionType};
use wds_types::PorcelainEntry;

use crate::config::{DuplicateIdPolicy, StatusConfig};
use crate::error::{StatusError, StatusResult};
use crate::file_change::WorkingDirectoryFileChange;

/// Derive the tri-state include-all flag from a file list.
///
/// - `Some(true)` if every file is fully selected, or the list is empty
/// - `Some(false)` if every file is fully deselected
/// - `None` if the selections are mixed
pub fn get_include_all_state<S: Selection>(files: &[WorkingDirectoryFileChange<S>]) -> Option<bool> {
    if files.is_empty() {
        return Some(true);
    }

    let all_selected = files
        .iter()
        .all(|f| f.selection_type() == SelectionType::All);
    if all_selected {
        return Some(true);
    }

    let none_selected = files
        .iter()
        .all(|f| f.selection_type() == SelectionType::None);
    if none_selected {
        return Some(false);
    }

    None
}

fn first_duplicate<S>(files: &[WorkingDirectoryFileChange<S>]) -> Option<(String, usize, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(files.len());
    for (ix, file) in files.iter().enumerate() {
        if let Some(first) = seen.insert(file.id(), ix) {
            return Some((file.id().to_string(), first, ix));
        }
    }
    None
}

/// The changed files of a working directory and whether they are all
/// included in the next commit.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDirectoryStatus<S = DiffSelection> {
    files: Vec<WorkingDirectoryFileChange<S>>,
    /// `Some(true)` all, `Some(false)` none, `None` mixed.
    include_all: Option<bool>,
    /// id to position in `files`; later files win on duplicate ids.
    #[serde(skip)]
    file_ix_by_id: HashMap<String, usize>,
}

impl<S: Selection> WorkingDirectoryStatus<S> {
    /// Build a status from a freshly computed file list, deriving the
    /// include-all flag from the files' selections.
    ///
    /// Duplicate ids are accepted: the last file with a given id owns the
    /// index slot and earlier ones are only reachable positionally.
    pub fn from_files(files: Vec<WorkingDirectoryFileChange<S>>) -> Self {
        let include_all = get_include_all_state(&files);
        Self::new(files, include_all)
    }

    /// Like [`from_files`](Self::from_files) but fails on the first
    /// duplicate id.
    pub fn try_from_files(files: Vec<WorkingDirectoryFileChange<S>>) -> StatusResult<Self> {
        if let Some((id, first, second)) = first_duplicate(&files) {
            return Err(StatusError::DuplicateId { id, first, second });
        }
        Ok(Self::from_files(files))
    }

    /// Build a status using the duplicate-id policy from `config`.
    pub fn from_files_with_config(
        files: Vec<WorkingDirectoryFileChange<S>>,
        config: &StatusConfig,
    ) -> StatusResult<Self> {
        match config.duplicate_ids {
            DuplicateIdPolicy::LastWins => Ok(Self::from_files(files)),
            DuplicateIdPolicy::Reject => Self::try_from_files(files),
        }
    }

    fn new(files: Vec<WorkingDirectoryFileChange<S>>, include_all: Option<bool>) -> Self {
        let mut file_ix_by_id = HashMap::with_capacity(files.len());
        for (ix, file) in files.iter().enumerate() {
            if let Some(shadowed) = file_ix_by_id.insert(file.id().to_string(), ix) {
                warn!(id = %file.id(), shadowed, ix, "duplicate file id, earlier file is unreachable by id");
            }
        }
        debug!(files = files.len(), ?include_all, "built working directory status");

        Self {
            files,
            include_all,
            file_ix_by_id,
        }
    }

    /// A copy with every file selected or deselected.
    ///
    /// The include-all flag is set to `include_all` as given rather than
    /// re-derived, so callers can show the requested state immediately.
    pub fn with_include_all_files(&self, include_all: bool) -> Self {
        let files = self
            .files
            .iter()
            .map(|f| f.with_include_all(include_all))
            .collect();
        debug!(include_all, "applied bulk selection");
        Self::new(files, Some(include_all))
    }

    /// A copy with one file's selection replaced and the include-all flag
    /// re-derived. Returns an unchanged copy if `id` is unknown.
    pub fn with_file_selection(&self, id: &str, selection: S) -> Self {
        let Some(ix) = self.find_file_index_by_id(id) else {
            debug!(id, "selection update for unknown file id ignored");
            return self.clone();
        };
        let mut files = self.files.clone();
        files[ix] = files[ix].with_selection(selection);
        Self::from_files(files)
    }

    /// The file with the given id, if any.
    pub fn find_file_with_id(&self, id: &str) -> Option<&WorkingDirectoryFileChange<S>> {
        self.find_file_index_by_id(id).map(|ix| &self.files[ix])
    }

    /// The position of the file with the given id, if any.
    pub fn find_file_index_by_id(&self, id: &str) -> Option<usize> {
        self.file_ix_by_id.get(id).copied()
    }

    pub fn files(&self) -> &[WorkingDirectoryFileChange<S>] {
        &self.files
    }

    /// `Some(true)` if all files are included, `Some(false)` if none are,
    /// `None` if mixed.
    pub fn include_all(&self) -> Option<bool> {
        self.include_all
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files with at least part of their diff selected, in order.
    pub fn included_files(&self) -> impl Iterator<Item = &WorkingDirectoryFileChange<S>> {
        self.files
            .iter()
            .filter(|f| f.selection_type() != SelectionType::None)
    }

    /// Files that are still conflicted, in order.
    pub fn conflicted_files(&self) -> impl Iterator<Item = &WorkingDirectoryFileChange<S>> {
        self.files.iter().filter(|f| f.status().is_conflicted())
    }
}

impl WorkingDirectoryStatus<DiffSelection> {
    /// Classify porcelain entries and build a status from them.
    ///
    /// Every file starts with the selection named in `config`. Conflicted
    /// files are classified without marker information.
    pub fn from_entries(entries: &[PorcelainEntry], config: &StatusConfig) -> StatusResult<Self> {
        Self::from_entries_with_markers(entries, config, |_| None)
    }

    /// Like [`from_entries`](Self::from_entries), but asks `markers` for the
    /// number of conflict markers left in each conflicted path. A conflict
    /// with none left classifies as `Resolved`.
    pub fn from_entries_with_markers(
        entries: &[PorcelainEntry],
        config: &StatusConfig,
        markers: impl Fn(&str) -> Option<usize>,
    ) -> StatusResult<Self> {
        let include = config.initial_selection.include();
        let files = entries
            .iter()
            .map(|entry| {
                let conflict_markers = entry.conflict().and_then(|_| markers(entry.path()));
                WorkingDirectoryFileChange::from_entry(entry, include, conflict_markers)
                    .inspect_err(|e| {
                        debug!(path = entry.path(), error = %e, "failed to classify entry");
                    })
            })
            .collect::<StatusResult<Vec<_>>>()?;
        Self::from_files_with_config(files, config)
    }
}

impl<S: Selection> Default for WorkingDirectoryStatus<S> {
    fn default() -> Self {
        Self::from_files(Vec::new())
    }
}
