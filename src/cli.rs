use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line surface: `folders-lock <ROOT> [DEPTH]`.
#[derive(Parser, Debug)]
#[command(
    name = "folders-lock",
    version,
    about = "Create a tree of numbered directories (0-9 at every level)",
    after_help = "Examples:\n  folders-lock my_data_directory\n  folders-lock /path/to/directory 3"
)]
pub struct Cli {
    /// Root directory of the tree; created if it does not exist.
    pub root: PathBuf,
    /// Number of subdirectory levels (positive integer, default 4).
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
    pub depth: Option<String>,
    /// Print the directory counts per level without creating anything.
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,
    /// How progress is reported while the tree is built.
    #[arg(long = "progress", value_enum, default_value_t = ProgressMode::Bar)]
    pub progress: ProgressMode,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    /// Single status line redrawn in place on stdout.
    Bar,
    /// Periodic `info` log events on stderr.
    Log,
    /// No progress output.
    None,
}

/// Parse process arguments, leaving exit handling to `main`.
pub fn parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
