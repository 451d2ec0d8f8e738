//! Line-granular diff selection.
//!
//! A [`DiffSelection`] stores a default state (everything selected or
//! nothing selected) plus the set of lines that diverge from that default.
//! This keeps the common cases (all / none) free of per-line bookkeeping.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SelectionError, SelectionResult};

/// How much of a file's diff is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionType {
    /// Every selectable line is included.
    All,
    /// Some, but not all, selectable lines are included.
    Partial,
    /// No line is included.
    None,
}

impl SelectionType {
    /// Returns `true` if this type already reflects the requested state,
    /// i.e. `All` when selecting or `None` when deselecting.
    fn matches(self, selected: bool) -> bool {
        matches!(
            (self, selected),
            (SelectionType::All, true) | (SelectionType::None, false)
        )
    }
}

impl fmt::Display for SelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionType::All => write!(f, "all"),
            SelectionType::Partial => write!(f, "partial"),
            SelectionType::None => write!(f, "none"),
        }
    }
}

/// The contract the status model needs from a file's selection.
///
/// Implementations are immutable snapshots: the `with_*` methods return new
/// values and never alter `self`.
pub trait Selection: Clone {
    /// Whether all, none or part of the file is selected.
    fn selection_type(&self) -> SelectionType;

    /// A copy of this selection with everything selected.
    fn with_select_all(&self) -> Self;

    /// A copy of this selection with nothing selected.
    fn with_select_none(&self) -> Self;
}

/// Per-line selection state for one file's diff.
///
/// Line numbers are indices into the flattened diff (see
/// [`DiffLines`](crate::diff::DiffLines)), not file line numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSelection {
    /// Either `All` or `None`; never `Partial`.
    default_selection_type: SelectionType,
    /// Lines whose state is the opposite of the default.
    diverging_lines: BTreeSet<usize>,
    /// Lines that can be toggled. `None` until the diff has been loaded, in
    /// which case every line is considered selectable.
    selectable_lines: Option<BTreeSet<usize>>,
}

impl DiffSelection {
    /// A selection that includes the whole file.
    pub fn all() -> Self {
        Self::from_initial_selection(true)
    }

    /// A selection that excludes the whole file.
    pub fn none() -> Self {
        Self::from_initial_selection(false)
    }

    /// A selection with every line selected (`true`) or deselected (`false`).
    pub fn from_initial_selection(include: bool) -> Self {
        Self {
            default_selection_type: if include {
                SelectionType::All
            } else {
                SelectionType::None
            },
            diverging_lines: BTreeSet::new(),
            selectable_lines: None,
        }
    }

    /// Returns `true` if the given diff line is selected.
    pub fn is_selected(&self, line: usize) -> bool {
        let diverging = self.diverging_lines.contains(&line);
        match self.default_selection_type {
            SelectionType::All => !diverging,
            _ => diverging,
        }
    }

    /// Returns `true` if the given diff line can be toggled.
    pub fn is_selectable(&self, line: usize) -> bool {
        self.selectable_lines
            .as_ref()
            .map_or(true, |lines| lines.contains(&line))
    }

    /// The selectable lines, if known.
    pub fn selectable_lines(&self) -> Option<&BTreeSet<usize>> {
        self.selectable_lines.as_ref()
    }

    /// Whether all, none or part of the file is selected.
    pub fn selection_type(&self) -> SelectionType {
        if self.diverging_lines.is_empty() {
            return self.default_selection_type;
        }

        if let Some(selectable) = &self.selectable_lines {
            if selectable.len() == self.diverging_lines.len()
                && selectable.iter().all(|l| self.diverging_lines.contains(l))
            {
                return match self.default_selection_type {
                    SelectionType::All => SelectionType::None,
                    _ => SelectionType::All,
                };
            }
        }

        SelectionType::Partial
    }

    /// Select or deselect a single line.
    pub fn with_line_selection(&self, line: usize, selected: bool) -> Self {
        self.with_range_selection(line, 1, selected)
    }

    /// Select or deselect a single line, rejecting lines that are not
    /// selectable.
    pub fn try_with_line_selection(&self, line: usize, selected: bool) -> SelectionResult<Self> {
        if !self.is_selectable(line) {
            return Err(SelectionError::LineNotSelectable(line));
        }
        Ok(self.with_line_selection(line, selected))
    }

    /// Select or deselect `length` lines starting at `from`.
    ///
    /// Lines that are not selectable are skipped.
    pub fn with_range_selection(&self, from: usize, length: usize, selected: bool) -> Self {
        let computed = self.selection_type();
        let to = from.saturating_add(length);

        if computed.matches(selected) {
            return self.clone();
        }

        if computed == SelectionType::Partial {
            let mut diverging = self.diverging_lines.clone();
            if self.default_selection_type.matches(selected) {
                for line in from..to {
                    diverging.remove(&line);
                }
            } else {
                diverging.extend((from..to).filter(|l| self.is_selectable(*l)));
            }

            return Self {
                default_selection_type: self.default_selection_type,
                diverging_lines: diverging,
                selectable_lines: self.selectable_lines.clone(),
            };
        }

        // Uniform selection: rebase the default on what is actually selected
        // so the new diverging set only holds the requested range.
        Self {
            default_selection_type: computed,
            diverging_lines: (from..to).filter(|l| self.is_selectable(*l)).collect(),
            selectable_lines: self.selectable_lines.clone(),
        }
    }

    /// Flip the state of a single line.
    pub fn with_toggle_line_selection(&self, line: usize) -> Self {
        self.with_line_selection(line, !self.is_selected(line))
    }

    /// A copy with everything selected. Selectable lines are preserved.
    pub fn with_select_all(&self) -> Self {
        Self {
            default_selection_type: SelectionType::All,
            diverging_lines: BTreeSet::new(),
            selectable_lines: self.selectable_lines.clone(),
        }
    }

    /// A copy with nothing selected. Selectable lines are preserved.
    pub fn with_select_none(&self) -> Self {
        Self {
            default_selection_type: SelectionType::None,
            diverging_lines: BTreeSet::new(),
            selectable_lines: self.selectable_lines.clone(),
        }
    }

    /// A copy restricted to the given selectable lines. Diverging lines
    /// outside the new set are dropped.
    pub fn with_selectable_lines(&self, selectable: BTreeSet<usize>) -> Self {
        let diverging = self
            .diverging_lines
            .intersection(&selectable)
            .copied()
            .collect();
        Self {
            default_selection_type: self.default_selection_type,
            diverging_lines: diverging,
            selectable_lines: Some(selectable),
        }
    }
}

impl Default for DiffSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl Selection for DiffSelection {
    fn selection_type(&self) -> SelectionType {
        DiffSelection::selection_type(self)
    }

    fn with_select_all(&self) -> Self {
        DiffSelection::with_select_all(self)
    }

    fn with_select_none(&self) -> Self {
        DiffSelection::with_select_none(self)
    }
}
