use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Deserialize;
use tracing::debug;
use wds_selection::{diff_lines, DiffLine, DiffLines, DiffSelection, SelectionType};
use wds_status::{StatusConfig, WorkingDirectoryFileChange, WorkingDirectoryStatus};
use wds_types::PorcelainEntry;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let output = match cli.command {
        Command::Status(args) => cmd_status(&args, &config, cli.format)?,
        Command::Select(args) => cmd_select(&args, &config, cli.format)?,
        Command::Toggle(args) => cmd_toggle(&args, &config, cli.format)?,
        Command::Diff(args) => cmd_diff(&args)?,
    };
    print!("{output}");
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StatusConfig> {
    match path {
        Some(path) => StatusConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(StatusConfig::default()),
    }
}

/// One element of the entries file. Conflicted entries may carry the number
/// of conflict markers still in the file.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    #[serde(flatten)]
    entry: PorcelainEntry,
    #[serde(default)]
    markers: Option<usize>,
}

fn load_entries(path: &Path) -> anyhow::Result<Vec<EntryRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<EntryRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse porcelain entries in {}", path.display()))?;
    debug!(count = records.len(), "loaded porcelain entries");
    Ok(records)
}

fn load_status(path: &Path, config: &StatusConfig) -> anyhow::Result<WorkingDirectoryStatus> {
    let records = load_entries(path)?;
    let markers: HashMap<&str, usize> = records
        .iter()
        .filter_map(|r| Some((r.entry.path(), r.markers?)))
        .collect();
    let entries: Vec<PorcelainEntry> = records.iter().map(|r| r.entry.clone()).collect();
    WorkingDirectoryStatus::from_entries_with_markers(&entries, config, |path| {
        markers.get(path).copied()
    })
    .context("failed to build status")
}

fn cmd_status(
    args: &StatusArgs,
    config: &StatusConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let status = load_status(&args.entries, config)?;
    render_status(&status, format)
}

fn cmd_select(
    args: &SelectArgs,
    config: &StatusConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let status = load_status(&args.entries, config)?;
    let status = status.with_include_all_files(args.which == Which::All);
    render_status(&status, format)
}

fn cmd_toggle(
    args: &ToggleArgs,
    config: &StatusConfig,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let status = load_status(&args.entries, config)?;
    let status = toggle_file(&status, &args.id)?;
    render_status(&status, format)
}

fn cmd_diff(args: &DiffArgs) -> anyhow::Result<String> {
    let old = std::fs::read(&args.old)
        .with_context(|| format!("failed to read {}", args.old.display()))?;
    let new = std::fs::read(&args.new)
        .with_context(|| format!("failed to read {}", args.new.display()))?;
    let diff = diff_lines(&old, &new);
    let mut selection = diff.apply_to(&DiffSelection::all());
    for line in &args.exclude {
        selection = selection
            .try_with_line_selection(*line, false)
            .with_context(|| format!("cannot exclude diff line {line}"))?;
    }
    Ok(render_diff(&diff, &selection))
}

/// Include a file if it is not fully included, exclude it otherwise.
fn toggle_file(status: &WorkingDirectoryStatus, id: &str) -> anyhow::Result<WorkingDirectoryStatus> {
    let Some(file) = status.find_file_with_id(id) else {
        bail!("no file with id {id}");
    };
    let include = file.selection_type() != SelectionType::All;
    let toggled = file.with_include_all(include);
    Ok(status.with_file_selection(id, toggled.selection().clone()))
}

fn selection_marker(file: &WorkingDirectoryFileChange) -> colored::ColoredString {
    match file.selection_type() {
        SelectionType::All => "[x]".green(),
        SelectionType::Partial => "[~]".yellow(),
        SelectionType::None => "[ ]".normal(),
    }
}

fn include_all_label(include_all: Option<bool>) -> colored::ColoredString {
    match include_all {
        Some(true) => "all".green().bold(),
        Some(false) => "none".red().bold(),
        None => "mixed".yellow().bold(),
    }
}

fn render_status(status: &WorkingDirectoryStatus, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        let mut json = serde_json::to_string_pretty(status)?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    if status.is_empty() {
        writeln!(out, "No changes. Working directory clean.")?;
        return Ok(out);
    }

    for file in status.files() {
        let kind = file.status().kind().to_string();
        match file.status().old_path() {
            Some(old_path) => writeln!(
                out,
                "  {} {:<10} {} → {}",
                selection_marker(file),
                kind.cyan(),
                old_path,
                file.path()
            )?,
            None => writeln!(
                out,
                "  {} {:<10} {}",
                selection_marker(file),
                kind.cyan(),
                file.path()
            )?,
        }
    }

    let included = status.included_files().count();
    writeln!(
        out,
        "\n{} of {} files included (select all: {})",
        included,
        status.len(),
        include_all_label(status.include_all())
    )?;

    let conflicted = status.conflicted_files().count();
    if conflicted > 0 {
        writeln!(out, "{} {} conflicted", "!".red().bold(), conflicted)?;
    }
    Ok(out)
}

fn render_diff(diff: &DiffLines, selection: &DiffSelection) -> String {
    if diff.is_binary {
        return "Binary files differ.\n".to_string();
    }
    if diff.is_empty() {
        return "No changes.\n".to_string();
    }

    let mut out = String::new();
    for (ix, line) in diff.lines.iter().enumerate() {
        let marker = if !line.is_change() {
            " "
        } else if selection.is_selected(ix) {
            "x"
        } else {
            " "
        };
        let text = match line {
            DiffLine::Hunk {
                old_start,
                old_count,
                new_start,
                new_count,
            } => format!("@@ -{old_start},{old_count} +{new_start},{new_count} @@").blue(),
            DiffLine::Context(t) => format!(" {t}").normal(),
            DiffLine::Added(t) => format!("+{t}").green(),
            DiffLine::Removed(t) => format!("-{t}").red(),
        };
        out.push_str(&format!("{ix:>4} [{marker}] {text}\n"));
    }
    out.push_str(&format!(
        "\n{} of {} changed lines selected ({})\n",
        diff.selected_changes(selection),
        diff.additions() + diff.deletions(),
        selection.selection_type()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_entries(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const ENTRIES: &str = r#"[
        {"kind":"ordinary","path":"src/lib.rs","index":"Unchanged","workingTree":"Modified"},
        {"kind":"renamedOrCopied","path":"b.txt","oldPath":"a.txt","index":"Renamed","workingTree":"Unchanged"},
        {"kind":"untracked","path":"notes.md"}
    ]"#;

    #[test]
    fn loads_entries_from_json() {
        let file = write_entries(ENTRIES);
        let entries = load_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].entry.old_path(), Some("a.txt"));
        assert_eq!(entries[1].markers, None);
    }

    #[test]
    fn conflict_markers_come_from_entries_file() {
        let file = write_entries(
            r#"[
                {"kind":"conflicted","path":"c","us":"Added","them":"Added","markers":0},
                {"kind":"conflicted","path":"d","us":"UpdatedButUnmerged","them":"UpdatedButUnmerged","markers":2},
                {"kind":"conflicted","path":"e","us":"UpdatedButUnmerged","them":"UpdatedButUnmerged"}
            ]"#,
        );
        let status = load_status(file.path(), &StatusConfig::default()).unwrap();
        let ids: Vec<_> = status.files().iter().map(|f| f.id()).collect();
        assert_eq!(ids, ["Resolved+c", "Conflicted+d", "Conflicted+e"]);
        assert_eq!(status.conflicted_files().count(), 2);
    }

    #[test]
    fn malformed_entries_are_reported() {
        let file = write_entries("{not json");
        let err = load_entries(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse porcelain entries"));
    }

    #[test]
    fn missing_config_falls_back_to_default() {
        assert_eq!(load_config(None).unwrap(), StatusConfig::default());
    }

    #[test]
    fn status_text_lists_every_file() {
        colored::control::set_override(false);
        let file = write_entries(ENTRIES);
        let status = load_status(file.path(), &StatusConfig::default()).unwrap();
        let text = render_status(&status, OutputFormat::Text).unwrap();
        assert!(text.contains("src/lib.rs"));
        assert!(text.contains("a.txt → b.txt"));
        assert!(text.contains("3 of 3 files included (select all: all)"));
    }

    #[test]
    fn toggle_makes_selection_mixed() {
        let file = write_entries(ENTRIES);
        let status = load_status(file.path(), &StatusConfig::default()).unwrap();
        let toggled = toggle_file(&status, "New+notes.md").unwrap();
        assert_eq!(toggled.include_all(), None);
        assert_eq!(toggled.included_files().count(), 2);

        let back = toggle_file(&toggled, "New+notes.md").unwrap();
        assert_eq!(back.include_all(), Some(true));
    }

    #[test]
    fn toggle_unknown_id_fails() {
        let status = WorkingDirectoryStatus::default();
        assert!(toggle_file(&status, "New+ghost").is_err());
    }

    #[test]
    fn json_output_has_tri_state() {
        let file = write_entries(ENTRIES);
        let status = load_status(file.path(), &StatusConfig::default())
            .unwrap()
            .with_include_all_files(false);
        let json = render_status(&status, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["includeAll"], false);
        assert_eq!(value["files"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn diff_rendering_marks_excluded_lines() {
        colored::control::set_override(false);
        let diff = diff_lines(b"a\nb\n", b"a\nc\n");
        let first_change = *diff.selectable_lines().iter().next().unwrap();
        let selection = diff
            .apply_to(&DiffSelection::all())
            .with_line_selection(first_change, false);
        let text = render_diff(&diff, &selection);
        assert!(text.contains("1 of 2 changed lines selected (partial)"));
    }
}
