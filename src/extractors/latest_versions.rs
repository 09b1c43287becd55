//! The `latest-versions` extractor.
//!
//! The main documentation page's sidebar carries a version list under
//! an "All versions" heading. Each link's text is either
//! `Python <major>.<minor> (<status>)` or free text; the former splits
//! into version and status, the latter becomes the version with an
//! empty status.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::errors::ScrapeError;
use crate::http::CachedClient;
use crate::models::ResultTable;
use crate::select::{find_required, TagQuery};

static VERSION_STATUS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").unwrap());

pub async fn scrape(
    client: &CachedClient,
    config: &AppConfig,
) -> Result<Option<ResultTable>, ScrapeError> {
    let Some(body) = client.fetch(&config.main_doc_url).await else {
        return Ok(None);
    };
    parse_version_list(&body).map(Some)
}

fn parse_version_list(html: &str) -> Result<ResultTable, ScrapeError> {
    let doc = Html::parse_document(html);
    let sidebar = find_required(
        doc.root_element(),
        &TagQuery::new("div").attr("class", "sphinxsidebarwrapper"),
    )?;

    let ul_selector = Selector::parse("ul").unwrap();
    let version_list = sidebar
        .select(&ul_selector)
        .find(|ul| ul.text().any(|t| t.contains("All versions")))
        .ok_or_else(|| {
            // the sidebar layout is assumed invariant; a miss means the
            // page changed underneath us
            let err = ScrapeError::tag_not_found("ul", "text contains \"All versions\"");
            error!(error = %err, "version list missing from sidebar");
            err
        })?;

    let a_selector = Selector::parse("a").unwrap();
    let mut table = ResultTable::new(["Link", "Version", "Status"]);
    for anchor in version_list.select(&a_selector) {
        let Some(href) = anchor.value().attr("href") else {
            warn!("version entry has no href; skipping entry");
            continue;
        };
        let text: String = anchor.text().collect();
        let (version, status) = split_version_status(&text);
        table.push_row([href.to_string(), version, status]);
    }
    Ok(table)
}

/// `"Python 3.9 (stable)"` → `("3.9", "stable")`; anything that does
/// not fit the pattern is the version verbatim, with an empty status.
fn split_version_status(text: &str) -> (String, String) {
    match VERSION_STATUS_RE.captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}
