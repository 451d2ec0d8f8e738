//! Flattened line diffs.
//!
//! Uses the `similar` crate (Myers diff algorithm) to produce a single list
//! of lines: a header per hunk followed by its context, added and removed
//! lines. Indices into this list are what a [`DiffSelection`] selects.

use std::collections::BTreeSet;

use similar::{ChangeTag, TextDiff};

use crate::selection::DiffSelection;

/// Number of unchanged lines shown around each change.
pub const DEFAULT_CONTEXT: usize = 3;

/// A single line of a flattened diff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// The start of a hunk (1-based line numbers).
    Hunk {
        old_start: usize,
        old_count: usize,
        new_start: usize,
        new_count: usize,
    },
    /// A line present in both old and new.
    Context(String),
    /// A line added in the new content.
    Added(String),
    /// A line removed from the old content.
    Removed(String),
}

impl DiffLine {
    /// Returns `true` for added and removed lines.
    pub fn is_change(&self) -> bool {
        matches!(self, DiffLine::Added(_) | DiffLine::Removed(_))
    }
}

/// The flattened diff of one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffLines {
    pub lines: Vec<DiffLine>,
    /// `true` if either side was not valid UTF-8. Binary diffs have no
    /// selectable lines.
    pub is_binary: bool,
}

impl DiffLines {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Indices of the lines a user can include or exclude.
    pub fn selectable_lines(&self) -> BTreeSet<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.is_change())
            .map(|(i, _)| i)
            .collect()
    }

    /// Attach this diff's selectable lines to an existing selection.
    pub fn apply_to(&self, selection: &DiffSelection) -> DiffSelection {
        selection.with_selectable_lines(self.selectable_lines())
    }

    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    /// Count of selected added and removed lines under `selection`.
    pub fn selected_changes(&self, selection: &DiffSelection) -> usize {
        self.lines
            .iter()
            .enumerate()
            .filter(|(i, line)| line.is_change() && selection.is_selected(*i))
            .count()
    }
}

/// Compute the flattened diff between two file contents.
pub fn diff_lines(old: &[u8], new: &[u8]) -> DiffLines {
    diff_lines_with_context(old, new, DEFAULT_CONTEXT)
}

/// Compute the flattened diff with a custom amount of context.
pub fn diff_lines_with_context(old: &[u8], new: &[u8], context: usize) -> DiffLines {
    let (old_str, new_str) = match (std::str::from_utf8(old), std::str::from_utf8(new)) {
        (Ok(o), Ok(n)) => (o, n),
        _ => {
            return DiffLines {
                lines: Vec::new(),
                is_binary: true,
            }
        }
    };

    if old_str == new_str {
        return DiffLines::default();
    }

    let text_diff = TextDiff::from_lines(old_str, new_str);
    let mut lines = Vec::new();

    for group in text_diff.grouped_ops(context) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;

        lines.push(DiffLine::Hunk {
            old_start: old_range.start + 1,
            old_count: old_range.len(),
            new_start: new_range.start + 1,
            new_count: new_range.len(),
        });

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                lines.push(match change.tag() {
                    ChangeTag::Equal => DiffLine::Context(text),
                    ChangeTag::Delete => DiffLine::Removed(text),
                    ChangeTag::Insert => DiffLine::Added(text),
                });
            }
        }
    }

    DiffLines {
        lines,
        is_binary: false,
    }
}
