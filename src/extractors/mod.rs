//! Page extractors, one per CLI mode.
//!
//! Each extractor drives the [`crate::http::CachedClient`] and the tag
//! locator through one specific page structure and produces tabular
//! rows for the reporter:
//!
//! | Mode | Module | Walk |
//! |------|--------|------|
//! | whats-new | [`whats_new`] | whatsnew index → one page per release |
//! | latest-versions | [`latest_versions`] | sidebar version list on the main page |
//! | download | [`download`] | downloads page → pdf-a4 archive (side effect only) |
//! | pep | [`pep`] | numerical index → one detail page per proposal |
//!
//! Common contract: `scrape(client, config)` returns
//! `Ok(Some(ResultTable))` with rows in source-document order,
//! `Ok(None)` when there is nothing to report (the index page failed to
//! load, or the mode only has side effects), and `Err` when a page is
//! missing structure the extractor depends on. Item-level fetch
//! failures are logged and skipped; iteration is strictly sequential.

pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;
