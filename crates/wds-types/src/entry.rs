//! Raw porcelain status entries.
//!
//! A [`PorcelainEntry`] is what the status parser hands to the classifier:
//! one per changed path, carrying zero, one or two [`StatusEntryCode`]s.

use serde::{Deserialize, Serialize};

use crate::code::StatusEntryCode;
use crate::error::TypeError;

/// The code pair of an unmerged path, one per side of the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConflictEntry {
    /// The change on our side.
    pub us: StatusEntryCode,
    /// The change on their side.
    pub them: StatusEntryCode,
}

impl ConflictEntry {
    pub fn new(us: StatusEntryCode, them: StatusEntryCode) -> Self {
        Self { us, them }
    }

    /// Returns `true` if either side deleted the file.
    ///
    /// Such conflicts cannot carry text markers and must be resolved by
    /// choosing a side.
    pub fn involves_deletion(&self) -> bool {
        self.us == StatusEntryCode::Deleted || self.them == StatusEntryCode::Deleted
    }
}

/// One raw status line, as reported by the version-control tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PorcelainEntry {
    /// A tracked path changed in the index and/or the working tree.
    #[serde(rename_all = "camelCase")]
    Ordinary {
        path: String,
        index: StatusEntryCode,
        working_tree: StatusEntryCode,
    },
    /// A path that was renamed or copied from `old_path`.
    #[serde(rename_all = "camelCase")]
    RenamedOrCopied {
        path: String,
        old_path: String,
        index: StatusEntryCode,
        working_tree: StatusEntryCode,
    },
    /// An unmerged path.
    Conflicted {
        path: String,
        us: StatusEntryCode,
        them: StatusEntryCode,
    },
    /// A path not known to the repository.
    Untracked { path: String },
}

impl PorcelainEntry {
    /// The current path of the entry, whatever its shape.
    pub fn path(&self) -> &str {
        match self {
            PorcelainEntry::Ordinary { path, .. }
            | PorcelainEntry::RenamedOrCopied { path, .. }
            | PorcelainEntry::Conflicted { path, .. }
            | PorcelainEntry::Untracked { path } => path,
        }
    }

    /// The pre-change path, for renames and copies.
    pub fn old_path(&self) -> Option<&str> {
        match self {
            PorcelainEntry::RenamedOrCopied { old_path, .. } => Some(old_path),
            _ => None,
        }
    }

    /// The conflict code pair, if this entry is unmerged.
    pub fn conflict(&self) -> Option<ConflictEntry> {
        match self {
            PorcelainEntry::Conflicted { us, them, .. } => Some(ConflictEntry::new(*us, *them)),
            _ => None,
        }
    }

    /// Reject entries whose path is empty.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.path().is_empty() {
            return Err(TypeError::EmptyPath);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordinary(path: &str) -> PorcelainEntry {
        PorcelainEntry::Ordinary {
            path: path.into(),
            index: StatusEntryCode::Modified,
            working_tree: StatusEntryCode::Unchanged,
        }
    }

    #[test]
    fn path_is_available_for_every_shape() {
        let entries = [
            ordinary("a.txt"),
            PorcelainEntry::RenamedOrCopied {
                path: "a.txt".into(),
                old_path: "old.txt".into(),
                index: StatusEntryCode::Renamed,
                working_tree: StatusEntryCode::Unchanged,
            },
            PorcelainEntry::Conflicted {
                path: "a.txt".into(),
                us: StatusEntryCode::UpdatedButUnmerged,
                them: StatusEntryCode::UpdatedButUnmerged,
            },
            PorcelainEntry::Untracked {
                path: "a.txt".into(),
            },
        ];
        for entry in &entries {
            assert_eq!(entry.path(), "a.txt");
        }
    }

    #[test]
    fn only_renames_carry_old_path() {
        assert_eq!(ordinary("x").old_path(), None);
        let renamed = PorcelainEntry::RenamedOrCopied {
            path: "b".into(),
            old_path: "a".into(),
            index: StatusEntryCode::Renamed,
            working_tree: StatusEntryCode::Unchanged,
        };
        assert_eq!(renamed.old_path(), Some("a"));
    }

    #[test]
    fn conflict_pair_is_extracted() {
        let entry = PorcelainEntry::Conflicted {
            path: "x".into(),
            us: StatusEntryCode::Deleted,
            them: StatusEntryCode::UpdatedButUnmerged,
        };
        let conflict = entry.conflict().unwrap();
        assert_eq!(conflict.us, StatusEntryCode::Deleted);
        assert!(conflict.involves_deletion());
        assert!(ordinary("x").conflict().is_none());
    }

    #[test]
    fn empty_path_fails_validation() {
        assert_eq!(ordinary("").validate(), Err(TypeError::EmptyPath));
        assert!(ordinary("x").validate().is_ok());
    }

    #[test]
    fn json_uses_kind_tag() {
        let json = r#"{"kind":"renamedOrCopied","path":"b","oldPath":"a","index":"Renamed","workingTree":"Unchanged"}"#;
        let entry: PorcelainEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.old_path(), Some("a"));

        let untracked = serde_json::to_string(&PorcelainEntry::Untracked {
            path: "n".into(),
        })
        .unwrap();
        assert_eq!(untracked, r#"{"kind":"untracked","path":"n"}"#);
    }
}
