//! The `whats-new` extractor.
//!
//! Walks the "What's new in Python" index: every `li.toctree-l1` entry
//! links to one release's changelog page. Each release page contributes
//! one row of `(link, title, editor/author)`, where the last field is
//! the page's first definition list flattened to a single line.
//!
//! A release page that fails to load is skipped; the index page failing
//! to load ends the run with nothing to report.

use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::errors::ScrapeError;
use crate::http::CachedClient;
use crate::models::ResultTable;
use crate::select::{find_required, TagQuery};

pub async fn scrape(
    client: &CachedClient,
    config: &AppConfig,
) -> Result<Option<ResultTable>, ScrapeError> {
    let whats_new_url = Url::parse(&config.main_doc_url)?.join("whatsnew/")?;
    let Some(body) = client.fetch(whats_new_url.as_str()).await else {
        return Ok(None);
    };

    let release_links = index_release_links(&body, &whats_new_url)?;
    info!(count = release_links.len(), "indexed release pages");

    let mut table = ResultTable::new(["Link", "Title", "Editor/Author"]);
    for link in &release_links {
        let Some(page) = client.fetch(link.as_str()).await else {
            // one broken release page should not end the run
            continue;
        };
        let (title, summary) = release_summary(&page)?;
        info!(link = %link, title = %title, "scraped release page");
        table.push_row([link.to_string(), title, summary]);
    }

    Ok(Some(table))
}

/// Resolve each release entry's link against the whatsnew index URL,
/// in document order.
fn index_release_links(html: &str, base: &Url) -> Result<Vec<Url>, ScrapeError> {
    let doc = Html::parse_document(html);
    let section = find_required(
        doc.root_element(),
        &TagQuery::new("section").attr("id", "what-s-new-in-python"),
    )?;
    let wrapper = find_required(section, &TagQuery::new("div").attr("class", "toctree-wrapper"))?;

    let entry_selector = Selector::parse("li.toctree-l1").unwrap();
    let mut links = Vec::new();
    for entry in wrapper.select(&entry_selector) {
        let anchor = find_required(entry, &TagQuery::new("a"))?;
        let Some(href) = anchor.value().attr("href") else {
            warn!("release entry link has no href; skipping entry");
            continue;
        };
        match base.join(href) {
            Ok(resolved) => links.push(resolved),
            Err(e) => warn!(href, error = %e, "unresolvable release link; skipping entry"),
        }
    }
    Ok(links)
}

/// Pull the `<h1>` title and the first `<dl>`'s text (newlines replaced
/// with spaces) out of one release page.
fn release_summary(html: &str) -> Result<(String, String), ScrapeError> {
    let doc = Html::parse_document(html);
    let h1 = find_required(doc.root_element(), &TagQuery::new("h1"))?;
    let title: String = h1.text().collect();
    let dl = find_required(doc.root_element(), &TagQuery::new("dl"))?;
    let summary = dl.text().collect::<String>().replace('\n', " ");
    Ok((title, summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r#"
        <html><body>
          <section id="what-s-new-in-python">
            <div class="toctree-wrapper compound">
              <ul>
                <li class="toctree-l1"><a href="3.13.html">What's new in 3.13</a></li>
                <li class="toctree-l1"><a href="3.12.html">What's new in 3.12</a></li>
                <li class="toctree-l2"><a href="nested.html">nested entry</a></li>
              </ul>
            </div>
          </section>
        </body></html>
    "#;

    const RELEASE_PAGE: &str = r##"
        <html><body>
          <h1>What's New In Python 3.13<a class="headerlink" href="#x">¶</a></h1>
          <dl class="field-list">
            <dt>Editor</dt>
            <dd>Adam Turner</dd>
          </dl>
        </body></html>
    "##;

    #[test]
    fn test_index_links_resolved_in_source_order() {
        let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
        let links = index_release_links(INDEX_PAGE, &base).unwrap();
        assert_eq!(
            links.iter().map(Url::as_str).collect::<Vec<_>>(),
            [
                "https://docs.python.org/3/whatsnew/3.13.html",
                "https://docs.python.org/3/whatsnew/3.12.html",
            ]
        );
    }

    #[test]
    fn test_index_without_section_is_fatal() {
        let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
        let err = index_release_links("<html><body></body></html>", &base).unwrap_err();
        assert!(matches!(err, ScrapeError::TagNotFound { .. }));
    }

    #[test]
    fn test_release_summary_flattens_definition_list() {
        let (title, summary) = release_summary(RELEASE_PAGE).unwrap();
        assert_eq!(title, "What's New In Python 3.13¶");
        assert!(summary.contains("Editor"));
        assert!(summary.contains("Adam Turner"));
        assert!(!summary.contains('\n'));
    }

    #[test]
    fn test_release_page_without_title_is_fatal() {
        let err = release_summary("<html><body><dl><dt>x</dt></dl></body></html>").unwrap_err();
        match err {
            ScrapeError::TagNotFound { tag, .. } => assert_eq!(tag, "h1"),
            other => panic!("unexpected error: {other}"),
        }
    }

    /// A release page that fails to load is omitted while the rest of
    /// the list is still scraped. Runs entirely against a seeded cache:
    /// the index and the 3.13 page are stored, the 3.12 page is not and
    /// its host does not resolve.
    #[tokio::test]
    async fn test_failed_release_page_is_skipped() {
        let cache_dir = std::env::temp_dir().join(format!(
            "pydocs_scrape_whatsnew_{}",
            std::process::id()
        ));
        tokio::fs::create_dir_all(&cache_dir).await.unwrap();
        let seed = |url: &str, body: &str| {
            std::fs::write(cache_dir.join(urlencoding::encode(url).as_ref()), body).unwrap()
        };
        seed("https://docs.invalid/3/whatsnew/", INDEX_PAGE);
        seed("https://docs.invalid/3/whatsnew/3.13.html", RELEASE_PAGE);

        let config = AppConfig {
            main_doc_url: "https://docs.invalid/3/".to_string(),
            cache_dir: cache_dir.clone(),
            ..AppConfig::default()
        };
        let client = CachedClient::new(config.cache_dir.clone());

        let table = scrape(&client, &config).await.unwrap().unwrap();
        let rows = table.data_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "https://docs.invalid/3/whatsnew/3.13.html");
        assert_eq!(rows[0][1], "What's New In Python 3.13¶");

        tokio::fs::remove_dir_all(&cache_dir).await.unwrap();
    }
}
