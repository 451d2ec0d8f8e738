use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A raw single-character status code as reported by the version-control tool.
///
/// Porcelain status output reports one code for the index and one for the
/// working tree (or one for each side of a conflict). The character mapping
/// follows the porcelain v2 format, where `.` marks an unchanged side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusEntryCode {
    Modified,
    Added,
    Deleted,
    Renamed,
    Copied,
    Unchanged,
    Untracked,
    Ignored,
    UpdatedButUnmerged,
}

impl StatusEntryCode {
    /// All codes, in declaration order.
    pub const ALL: [StatusEntryCode; 9] = [
        StatusEntryCode::Modified,
        StatusEntryCode::Added,
        StatusEntryCode::Deleted,
        StatusEntryCode::Renamed,
        StatusEntryCode::Copied,
        StatusEntryCode::Unchanged,
        StatusEntryCode::Untracked,
        StatusEntryCode::Ignored,
        StatusEntryCode::UpdatedButUnmerged,
    ];

    /// The porcelain character for this code.
    pub fn as_char(self) -> char {
        match self {
            StatusEntryCode::Modified => 'M',
            StatusEntryCode::Added => 'A',
            StatusEntryCode::Deleted => 'D',
            StatusEntryCode::Renamed => 'R',
            StatusEntryCode::Copied => 'C',
            StatusEntryCode::Unchanged => '.',
            StatusEntryCode::Untracked => '?',
            StatusEntryCode::Ignored => '!',
            StatusEntryCode::UpdatedButUnmerged => 'U',
        }
    }

    /// Returns `true` if this side of the entry carries no change.
    pub fn is_unchanged(self) -> bool {
        matches!(self, StatusEntryCode::Unchanged | StatusEntryCode::Ignored)
    }
}

impl TryFrom<char> for StatusEntryCode {
    type Error = TypeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'M' => Ok(StatusEntryCode::Modified),
            'A' => Ok(StatusEntryCode::Added),
            'D' => Ok(StatusEntryCode::Deleted),
            'R' => Ok(StatusEntryCode::Renamed),
            'C' => Ok(StatusEntryCode::Copied),
            // porcelain v1 reports an unchanged side as a space
            '.' | ' ' => Ok(StatusEntryCode::Unchanged),
            '?' => Ok(StatusEntryCode::Untracked),
            '!' => Ok(StatusEntryCode::Ignored),
            'U' => Ok(StatusEntryCode::UpdatedButUnmerged),
            other => Err(TypeError::UnknownStatusCode(other)),
        }
    }
}

impl fmt::Display for StatusEntryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
