//! CSV file output for the `--output file` mode.
//!
//! The dialect is deliberately strict so files round-trip: every field
//! is double-quoted, embedded quotes are doubled, records end with a
//! bare `\n`. Files land in the results directory as
//! `<mode>_<YYYY-MM-DD_HH-MM-SS>.csv` with the header as row 0.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;
use tracing::info;

use crate::errors::ScrapeError;
use crate::models::ResultTable;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Write `results` as CSV under `results_dir`, creating the directory
/// if needed. Returns the path of the written file.
pub async fn write_table(
    results: &ResultTable,
    mode_name: &str,
    results_dir: &Path,
) -> Result<PathBuf, ScrapeError> {
    fs::create_dir_all(results_dir).await?;
    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let path = results_dir.join(format!("{mode_name}_{timestamp}.csv"));
    fs::write(&path, render(results)).await?;
    info!(path = %path.display(), rows = results.len(), "results file saved");
    Ok(path)
}

/// Serialize all rows, header first.
pub fn render(results: &ResultTable) -> String {
    let mut out = String::new();
    for row in results.iter_all() {
        let mut first = true;
        for field in row {
            if !first {
                out.push(',');
            }
            first = false;
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        }
        out.push('\n');
    }
    out
}
