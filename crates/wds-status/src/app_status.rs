//! Application-level file status.
//!
//! [`AppFileStatus`] is the normalized classification shown to the user and
//! used to pick the actions available for a file. It is derived from a raw
//! [`PorcelainEntry`](wds_types::PorcelainEntry) by [`classify`](crate::classify::classify).

use std::fmt;

use serde::{Deserialize, Serialize};
use wds_types::ConflictEntry;

/// The discriminant of an [`AppFileStatus`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AppFileStatusKind {
    New,
    Modified,
    Deleted,
    Copied,
    Renamed,
    Conflicted,
    Resolved,
}

impl AppFileStatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AppFileStatusKind::New => "New",
            AppFileStatusKind::Modified => "Modified",
            AppFileStatusKind::Deleted => "Deleted",
            AppFileStatusKind::Copied => "Copied",
            AppFileStatusKind::Renamed => "Renamed",
            AppFileStatusKind::Conflicted => "Conflicted",
            AppFileStatusKind::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for AppFileStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conflict detail attached to a conflicted file.
///
/// Owned by the conflict-resolution collaborator; the status model only
/// carries it along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictStatus {
    /// What each side of the merge did to the file.
    pub entry: ConflictEntry,
    /// Number of conflict markers left in the file, if it was scanned.
    pub marker_count: Option<usize>,
}

impl ConflictStatus {
    pub fn new(entry: ConflictEntry, marker_count: Option<usize>) -> Self {
        Self {
            entry,
            marker_count,
        }
    }

    /// Returns `true` if the file still contains conflict markers.
    pub fn has_markers(&self) -> bool {
        self.marker_count.is_some_and(|n| n > 0)
    }

    /// Returns `true` if the conflict cannot be resolved by editing markers
    /// and a side has to be picked instead.
    pub fn is_manual(&self) -> bool {
        self.marker_count.is_none() || self.entry.involves_deletion()
    }
}

/// How the application classifies a changed file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AppFileStatus {
    New,
    Modified,
    Deleted,
    /// Copied from `old_path`.
    #[serde(rename_all = "camelCase")]
    Copied { old_path: String },
    /// Renamed from `old_path`.
    #[serde(rename_all = "camelCase")]
    Renamed { old_path: String },
    Conflicted(ConflictStatus),
    // TODO: carry the resolution choice (ours/theirs/merged) once the
    // conflict-resolution flow reports it.
    Resolved,
}

impl AppFileStatus {
    pub fn kind(&self) -> AppFileStatusKind {
        match self {
            AppFileStatus::New => AppFileStatusKind::New,
            AppFileStatus::Modified => AppFileStatusKind::Modified,
            AppFileStatus::Deleted => AppFileStatusKind::Deleted,
            AppFileStatus::Copied { .. } => AppFileStatusKind::Copied,
            AppFileStatus::Renamed { .. } => AppFileStatusKind::Renamed,
            AppFileStatus::Conflicted(_) => AppFileStatusKind::Conflicted,
            AppFileStatus::Resolved => AppFileStatusKind::Resolved,
        }
    }

    /// The pre-change path of a rename or copy.
    pub fn old_path(&self) -> Option<&str> {
        match self {
            AppFileStatus::Copied { old_path } | AppFileStatus::Renamed { old_path } => {
                Some(old_path)
            }
            _ => None,
        }
    }

    /// The conflict detail of a conflicted file.
    pub fn conflict(&self) -> Option<&ConflictStatus> {
        match self {
            AppFileStatus::Conflicted(conflict) => Some(conflict),
            _ => None,
        }
    }

    pub fn is_conflicted(&self) -> bool {
        matches!(self, AppFileStatus::Conflicted(_))
    }
}
