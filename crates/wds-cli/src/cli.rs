use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "wds",
    about = "Working directory status: classify changes and choose what goes into the next commit",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with status settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show classified files and the include-all state
    Status(StatusArgs),
    /// Include or exclude every file
    Select(SelectArgs),
    /// Flip inclusion of a single file
    Toggle(ToggleArgs),
    /// Show the line diff of a file with its selectable lines
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct StatusArgs {
    /// JSON array of porcelain entries
    pub entries: PathBuf,
}

#[derive(Args)]
pub struct SelectArgs {
    pub entries: PathBuf,
    #[arg(value_enum)]
    pub which: Which,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Which {
    All,
    None,
}

#[derive(Args)]
pub struct ToggleArgs {
    pub entries: PathBuf,
    /// File id, e.g. `Modified+src/lib.rs`
    pub id: String,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Diff line indices to leave out of the selection
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<usize>,
}
