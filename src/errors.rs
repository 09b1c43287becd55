//! Error types shared across the scraper.
//!
//! There are two propagation regimes:
//!
//! - Network failures on cached page loads are recovered close to the
//!   request site ([`crate::http::CachedClient::fetch`] logs them and
//!   returns `None`), so extractors can skip a single bad page.
//! - Structural failures (a required tag missing from an index page)
//!   are fatal. They bubble up as [`ScrapeError`] all the way out of
//!   `main`, terminating the run with a non-zero exit status.

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while scraping.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A required element is absent from a page the extractor depends on.
    /// Usually means the site layout changed or the configured URL is wrong.
    #[error("tag not found: <{tag}> {filter}")]
    TagNotFound { tag: String, filter: String },

    /// The network layer failed to produce a response.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a success status.
    #[error("{url} returned HTTP {status}")]
    BadStatus { url: String, status: StatusCode },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The YAML config file could not be parsed.
    #[error("invalid config file {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ScrapeError {
    /// Build a [`ScrapeError::TagNotFound`] from a tag name and a
    /// human-readable description of the filter that failed to match.
    pub fn tag_not_found(tag: impl Into<String>, filter: impl Into<String>) -> Self {
        ScrapeError::TagNotFound {
            tag: tag.into(),
            filter: filter.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_not_found_display() {
        let err = ScrapeError::tag_not_found("section", "id=\"numerical-index\"");
        assert_eq!(
            err.to_string(),
            "tag not found: <section> id=\"numerical-index\""
        );
    }
}
