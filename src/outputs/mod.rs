//! Result presentation.
//!
//! Every extractor that produces rows hands one [`ResultTable`] to
//! [`control_output`], which renders it according to the selected
//! [`OutputMode`]:
//!
//! - [`OutputMode::Default`]: each row's fields space-joined to stdout
//! - [`OutputMode::Pretty`]: an aligned ASCII table ([`table`])
//! - [`OutputMode::File`]: a timestamped CSV under the results
//!   directory ([`csv`])

pub mod csv;
pub mod table;

use std::path::Path;

use crate::errors::ScrapeError;
use crate::models::ResultTable;

/// How the run's results leave the process. Selected by the
/// `--output` flag; absent means [`OutputMode::Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Default,
    Pretty,
    File,
}

/// Render `results` in the chosen mode. `mode_name` is the CLI mode's
/// kebab-case name, used for the CSV filename.
pub async fn control_output(
    results: &ResultTable,
    output: OutputMode,
    mode_name: &str,
    results_dir: &Path,
) -> Result<(), ScrapeError> {
    match output {
        OutputMode::Default => default_output(results),
        OutputMode::Pretty => println!("{}", table::render(results)),
        OutputMode::File => {
            csv::write_table(results, mode_name, results_dir).await?;
        }
    }
    Ok(())
}

/// Plain stdout: one line per row, header first, fields space-joined.
fn default_output(results: &ResultTable) {
    for row in results.iter_all() {
        println!("{}", row.join(" "));
    }
}
