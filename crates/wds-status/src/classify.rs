//! Classification of raw porcelain entries.
//!
//! Each [`PorcelainEntry`] maps to exactly one [`AppFileStatus`].

use wds_types::{ConflictEntry, PorcelainEntry, StatusEntryCode};

use crate::app_status::{AppFileStatus, ConflictStatus};
use crate::error::{StatusError, StatusResult};

/// Classify an entry without conflict-marker information.
///
/// Conflicted entries come back as `Conflicted` with an unknown marker count.
pub fn classify(entry: &PorcelainEntry) -> StatusResult<AppFileStatus> {
    classify_with_markers(entry, None)
}

/// Classify an entry, using the number of conflict markers the
/// conflict-resolution collaborator found in the file.
///
/// A conflicted file whose markers have all been removed (`Some(0)`)
/// classifies as `Resolved`.
pub fn classify_with_markers(
    entry: &PorcelainEntry,
    conflict_markers: Option<usize>,
) -> StatusResult<AppFileStatus> {
    entry.validate()?;

    match entry {
        PorcelainEntry::Untracked { .. } => Ok(AppFileStatus::New),
        PorcelainEntry::Ordinary {
            path,
            index,
            working_tree,
        } => classify_ordinary(path, *index, *working_tree),
        PorcelainEntry::RenamedOrCopied {
            path,
            old_path,
            index,
            working_tree,
        } => {
            if old_path.is_empty() {
                return Err(StatusError::MissingOldPath { path: path.clone() });
            }
            if old_path == path {
                return Err(StatusError::SelfRename { path: path.clone() });
            }
            let old_path = old_path.clone();
            if *index == StatusEntryCode::Copied || *working_tree == StatusEntryCode::Copied {
                Ok(AppFileStatus::Copied { old_path })
            } else {
                Ok(AppFileStatus::Renamed { old_path })
            }
        }
        PorcelainEntry::Conflicted { us, them, .. } => {
            let conflict = ConflictEntry::new(*us, *them);
            if conflict_markers == Some(0) && !conflict.involves_deletion() {
                return Ok(AppFileStatus::Resolved);
            }
            Ok(AppFileStatus::Conflicted(ConflictStatus::new(
                conflict,
                conflict_markers,
            )))
        }
    }
}

fn classify_ordinary(
    path: &str,
    index: StatusEntryCode,
    working_tree: StatusEntryCode,
) -> StatusResult<AppFileStatus> {
    let either = |code: StatusEntryCode| index == code || working_tree == code;

    if either(StatusEntryCode::Deleted) {
        Ok(AppFileStatus::Deleted)
    } else if either(StatusEntryCode::Added) || either(StatusEntryCode::Untracked) {
        Ok(AppFileStatus::New)
    } else if index.is_unchanged() && working_tree.is_unchanged() {
        Err(StatusError::UnchangedEntry(path.to_string()))
    } else {
        Ok(AppFileStatus::Modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_status::AppFileStatusKind;

    fn ordinary(index: StatusEntryCode, working_tree: StatusEntryCode) -> PorcelainEntry {
        PorcelainEntry::Ordinary {
            path: "file.txt".into(),
            index,
            working_tree,
        }
    }

    fn conflicted(us: StatusEntryCode, them: StatusEntryCode) -> PorcelainEntry {
        PorcelainEntry::Conflicted {
            path: "file.txt".into(),
            us,
            them,
        }
    }

    #[test]
    fn untracked_is_new() {
        let entry = PorcelainEntry::Untracked {
            path: "new.txt".into(),
        };
        assert_eq!(classify(&entry).unwrap(), AppFileStatus::New);
    }

    #[test]
    fn ordinary_codes() {
        use StatusEntryCode::*;
        let cases = [
            (Modified, Unchanged, AppFileStatusKind::Modified),
            (Unchanged, Modified, AppFileStatusKind::Modified),
            (Modified, Modified, AppFileStatusKind::Modified),
            (Added, Unchanged, AppFileStatusKind::New),
            (Added, Modified, AppFileStatusKind::New),
            (Added, Deleted, AppFileStatusKind::Deleted),
            (Deleted, Unchanged, AppFileStatusKind::Deleted),
            (Modified, Deleted, AppFileStatusKind::Deleted),
        ];
        for (index, working_tree, expected) in cases {
            let status = classify(&ordinary(index, working_tree)).unwrap();
            assert_eq!(status.kind(), expected, "{index}{working_tree}");
        }
    }

    #[test]
    fn unchanged_ordinary_entry_is_rejected() {
        let err = classify(&ordinary(StatusEntryCode::Unchanged, StatusEntryCode::Unchanged))
            .unwrap_err();
        assert!(matches!(err, StatusError::UnchangedEntry(p) if p == "file.txt"));
    }

    #[test]
    fn rename_and_copy_carry_old_path() {
        let renamed = PorcelainEntry::RenamedOrCopied {
            path: "b.txt".into(),
            old_path: "a.txt".into(),
            index: StatusEntryCode::Renamed,
            working_tree: StatusEntryCode::Modified,
        };
        assert_eq!(
            classify(&renamed).unwrap(),
            AppFileStatus::Renamed {
                old_path: "a.txt".into()
            }
        );

        let copied = PorcelainEntry::RenamedOrCopied {
            path: "b.txt".into(),
            old_path: "a.txt".into(),
            index: StatusEntryCode::Copied,
            working_tree: StatusEntryCode::Unchanged,
        };
        assert_eq!(classify(&copied).unwrap().kind(), AppFileStatusKind::Copied);
    }

    #[test]
    fn rename_without_old_path_is_rejected() {
        let entry = PorcelainEntry::RenamedOrCopied {
            path: "b.txt".into(),
            old_path: String::new(),
            index: StatusEntryCode::Renamed,
            working_tree: StatusEntryCode::Unchanged,
        };
        assert!(matches!(
            classify(&entry),
            Err(StatusError::MissingOldPath { .. })
        ));
    }

    #[test]
    fn rename_onto_itself_is_rejected() {
        let entry = PorcelainEntry::RenamedOrCopied {
            path: "a".into(),
            old_path: "a".into(),
            index: StatusEntryCode::Renamed,
            working_tree: StatusEntryCode::Unchanged,
        };
        assert!(matches!(
            classify(&entry),
            Err(StatusError::SelfRename { path }) if path == "a"
        ));
    }

    #[test]
    fn empty_path_is_invalid() {
        let entry = PorcelainEntry::Untracked {
            path: String::new(),
        };
        assert!(matches!(classify(&entry), Err(StatusError::InvalidEntry(_))));
    }

    #[test]
    fn conflicts_keep_their_detail() {
        use StatusEntryCode::*;
        let status = classify_with_markers(
            &conflicted(UpdatedButUnmerged, UpdatedButUnmerged),
            Some(2),
        )
        .unwrap();
        let detail = status.conflict().unwrap();
        assert_eq!(detail.marker_count, Some(2));
        assert_eq!(detail.entry.us, UpdatedButUnmerged);
    }

    #[test]
    fn conflict_without_markers_left_is_resolved() {
        use StatusEntryCode::*;
        let status =
            classify_with_markers(&conflicted(Added, Added), Some(0)).unwrap();
        assert_eq!(status, AppFileStatus::Resolved);
    }

    #[test]
    fn deletion_conflicts_never_resolve_by_markers() {
        use StatusEntryCode::*;
        let status =
            classify_with_markers(&conflicted(Deleted, UpdatedButUnmerged), Some(0)).unwrap();
        assert_eq!(status.kind(), AppFileStatusKind::Conflicted);
    }

    #[test]
    fn unscanned_conflict_stays_conflicted() {
        use StatusEntryCode::*;
        let status = classify(&conflicted(UpdatedButUnmerged, UpdatedButUnmerged)).unwrap();
        assert!(status.is_conflicted());
    }
}
