//! The `download` extractor.
//!
//! Finds the pdf-a4 archive link in the downloads page's artifact
//! table, prints the resolved URL, and saves the archive under
//! `<base_dir>/downloads/` using the URL's final path segment as the
//! filename. Produces no table; the saved file is the result.
//!
//! The archive body is fetched with a direct, uncached GET, and a
//! failure there is fatal, unlike the page loads.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tokio::fs;
use tracing::info;
use url::Url;

use crate::config::AppConfig;
use crate::errors::ScrapeError;
use crate::http::CachedClient;
use crate::models::ResultTable;
use crate::select::{find_required, TagQuery};

static PDF_A4_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r".+pdf-a4\.zip$").unwrap());

pub async fn scrape(
    client: &CachedClient,
    config: &AppConfig,
) -> Result<Option<ResultTable>, ScrapeError> {
    let downloads_url = Url::parse(&config.main_doc_url)?.join("download.html")?;
    let Some(body) = client.fetch(downloads_url.as_str()).await else {
        return Ok(None);
    };

    let archive_url = locate_archive_url(&body, &downloads_url)?;
    println!("{archive_url}");

    let filename = archive_filename(&archive_url);
    let downloads_dir = config.downloads_dir();
    fs::create_dir_all(&downloads_dir).await?;
    let archive_path = downloads_dir.join(filename);

    let bytes = client.get_bytes_uncached(archive_url.as_str()).await?;
    fs::write(&archive_path, &bytes).await?;
    info!(path = %archive_path.display(), bytes = bytes.len(), "archive downloaded and saved");

    Ok(None)
}

/// The absolute URL of the pdf-a4 archive linked from the downloads
/// page's artifact table.
fn locate_archive_url(html: &str, base: &Url) -> Result<Url, ScrapeError> {
    let doc = Html::parse_document(html);
    let main = find_required(doc.root_element(), &TagQuery::new("div").attr("role", "main"))?;
    let table = find_required(main, &TagQuery::new("table").attr("class", "docutils"))?;
    let anchor = find_required(
        table,
        &TagQuery::new("a").attr_pattern("href", PDF_A4_RE.clone()),
    )?;
    // the pattern matcher only matches when href is present
    let href = anchor.value().attr("href").unwrap_or_default();
    Ok(base.join(href)?)
}

/// Final path segment of the archive URL.
fn archive_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("download.zip")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOWNLOADS_PAGE: &str = r#"
        <html><body>
          <div role="main">
            <table class="docutils">
              <tr>
                <td><a href="archives/python-3.13-docs-pdf-letter.zip">PDF (US-Letter)</a></td>
                <td><a href="archives/python-3.13-docs-pdf-a4.zip">PDF (A4)</a></td>
                <td><a href="archives/python-3.13-docs-html.zip">HTML</a></td>
              </tr>
            </table>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_archive_link_is_resolved_against_page_url() {
        let base = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let url = locate_archive_url(DOWNLOADS_PAGE, &base).unwrap();
        assert_eq!(
            url.as_str(),
            "https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip"
        );
    }

    #[test]
    fn test_missing_artifact_table_is_fatal() {
        let base = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let page = r#"<html><body><div role="main"><p>no table</p></div></body></html>"#;
        let err = locate_archive_url(page, &base).unwrap_err();
        match err {
            ScrapeError::TagNotFound { tag, .. } => assert_eq!(tag, "table"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_a4_link_is_fatal() {
        let base = Url::parse("https://docs.python.org/3/download.html").unwrap();
        let page = r#"<html><body><div role="main">
            <table class="docutils">
              <tr><td><a href="archives/python-3.13-docs-html.zip">HTML</a></td></tr>
            </table>
        </div></body></html>"#;
        let err = locate_archive_url(page, &base).unwrap_err();
        match err {
            ScrapeError::TagNotFound { tag, filter } => {
                assert_eq!(tag, "a");
                assert!(filter.contains("pdf-a4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_filename_is_final_path_segment() {
        let url =
            Url::parse("https://docs.python.org/3/archives/python-3.13-docs-pdf-a4.zip").unwrap();
        assert_eq!(archive_filename(&url), "python-3.13-docs-pdf-a4.zip");
    }

    #[test]
    fn test_filename_falls_back_when_path_is_bare() {
        let url = Url::parse("https://docs.python.org/").unwrap();
        assert_eq!(archive_filename(&url), "download.zip");
    }
}
