//! Runtime configuration.
//!
//! All tunables live in one [`AppConfig`] value built at process start
//! and passed by reference into every component; nothing reads global
//! state. Defaults cover normal use; `--config <path>` loads overrides
//! from a YAML file, any subset of fields:
//!
//! ```yaml
//! main_doc_url: "https://docs.python.org/3/"
//! base_dir: "/var/lib/pydocs"
//! expected_status:
//!   A: [Active, Accepted]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::ScrapeError;

/// Maps a single-letter status code from the proposal index table to
/// the set of acceptable human-readable status strings.
pub type ExpectedStatusMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Root of the documentation site, with a trailing slash.
    pub main_doc_url: String,
    /// Root of the proposal index site.
    pub peps_url: String,
    /// Base directory for the `downloads/` and `results/` artifacts.
    pub base_dir: PathBuf,
    /// Where cached HTTP response bodies are stored.
    pub cache_dir: PathBuf,
    /// Status-code expectations for the `pep` mode.
    pub expected_status: ExpectedStatusMap,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            main_doc_url: "https://docs.python.org/3/".to_string(),
            peps_url: "https://peps.python.org/".to_string(),
            base_dir: PathBuf::from("."),
            cache_dir: PathBuf::from(".web_cache"),
            expected_status: default_expected_status(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults when `path` is `None`, otherwise
    /// the defaults overridden by the YAML file at `path`.
    pub fn load(path: Option<&str>) -> Result<Self, ScrapeError> {
        match path {
            None => Ok(AppConfig::default()),
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                serde_yaml::from_str(&raw).map_err(|source| ScrapeError::Config {
                    path: path.to_string(),
                    source,
                })
            }
        }
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join("results")
    }
}

/// The status codes used by the proposal index table. The empty key
/// covers rows whose code cell holds only the type glyph.
fn default_expected_status() -> ExpectedStatusMap {
    let entries: [(&str, &[&str]); 8] = [
        ("A", &["Active", "Accepted"]),
        ("D", &["Deferred"]),
        ("F", &["Final"]),
        ("P", &["Provisional"]),
        ("R", &["Rejected"]),
        ("S", &["Superseded"]),
        ("W", &["Withdrawn"]),
        ("", &["Draft", "Active"]),
    ];
    entries
        .iter()
        .map(|(code, statuses)| {
            (
                code.to_string(),
                statuses.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}
