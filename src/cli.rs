//! Command-line interface definitions.
//!
//! One positional mode selects the extractor; the flags control cache
//! clearing, output rendering, and an optional config file.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Plain stdout output
/// pydocs_scrape latest-versions
///
/// # Aligned table, fresh cache
/// pydocs_scrape pep --clear-cache --output pretty
///
/// # CSV file under results/
/// pydocs_scrape whats-new --output file
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    pub mode: Mode,

    /// Drop all cached HTTP responses before running
    #[arg(long)]
    pub clear_cache: bool,

    /// Render results as a table or CSV file instead of plain stdout
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFlag>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,
}

/// The extractor to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Per-release changelog links, titles, and editors
    WhatsNew,
    /// The sidebar's version/status list from the main page
    LatestVersions,
    /// Save the pdf-a4 documentation archive
    Download,
    /// Tally proposal statuses and cross-check the index table
    Pep,
}

impl Mode {
    /// The kebab-case name as typed on the command line; also the CSV
    /// filename prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

/// The non-default output renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFlag {
    /// Aligned text table
    Pretty,
    /// Timestamped CSV file under the results directory
    File,
}
