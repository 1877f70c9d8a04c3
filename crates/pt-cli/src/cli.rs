//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Find correlations between logged foods and bowel movement quality.
///
/// Reads a journal of timestamped events, pairs each poop entry with the
/// foods eaten within 24 hours, and prints a table of foods ranked worst
/// first.
#[derive(Debug, Parser)]
#[command(name = "pt", version, about, long_about = None)]
pub struct Cli {
    /// Path to the journal CSV. Overrides the configured path.
    pub journal: Option<PathBuf>,

    /// Also send the report by email, using the [smtp] config section.
    #[arg(short, long)]
    pub email: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
