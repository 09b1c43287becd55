//! The `pep` extractor.
//!
//! Two passes over the proposal index. The first reads the numerical
//! index table: each row carries a status code (one decorative type
//! glyph followed by at most one status letter) and a link to the
//! proposal's detail page. The code maps through the configured
//! [`ExpectedStatusMap`] to the statuses the detail page is allowed to
//! show. The second pass loads each detail page, reads the `Status:`
//! field from the article's field list, tallies it, and records a
//! mismatch when it is not among the expected statuses.
//!
//! Mismatches are diagnostics, not results: they are logged as
//! warnings at the end of the run, while the returned table holds the
//! per-status tally plus a Total row.
//!
//! A detail page without a `Status:` term is skipped with a warning.
//! (The reference implementation silently reused the previous page's
//! status there; that was a stale-variable accident, not behavior
//! worth keeping.)

use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::config::{AppConfig, ExpectedStatusMap};
use crate::errors::ScrapeError;
use crate::http::CachedClient;
use crate::models::{MismatchRecord, ResultTable, StatusTally};
use crate::select::{find_required, TagQuery};

/// One numerical-index row: where the detail page lives and which
/// statuses it may show.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingProposal {
    link: Url,
    expected: Vec<String>,
}

pub async fn scrape(
    client: &CachedClient,
    config: &AppConfig,
) -> Result<Option<ResultTable>, ScrapeError> {
    let peps_url = Url::parse(&config.peps_url)?;
    let Some(body) = client.fetch(peps_url.as_str()).await else {
        return Ok(None);
    };

    let pending = index_proposals(&body, &peps_url, &config.expected_status)?;
    info!(count = pending.len(), "indexed proposals");

    let mut tally = StatusTally::default();
    let mut mismatches: Vec<MismatchRecord> = Vec::new();
    for proposal in &pending {
        let Some(page) = client.fetch(proposal.link.as_str()).await else {
            continue;
        };
        let Some(observed) = page_status(&page)? else {
            warn!(link = %proposal.link, "proposal page has no Status field; skipping");
            continue;
        };
        tally.record(&observed);
        if !proposal.expected.contains(&observed) {
            mismatches.push(MismatchRecord {
                link: proposal.link.to_string(),
                observed,
                expected: proposal.expected.clone(),
            });
        }
    }

    if !mismatches.is_empty() {
        warn!(count = mismatches.len(), "mismatched proposal statuses:");
        for m in &mismatches {
            warn!(link = %m.link, observed = %m.observed, expected = ?m.expected, "status mismatch");
        }
    }

    Ok(Some(tally.into_table()))
}

/// First pass: read every data row of the numerical index table.
/// Rows missing cells or a link are malformed; they are skipped with a
/// warning rather than aborting the run.
fn index_proposals(
    html: &str,
    base: &Url,
    expected_status: &ExpectedStatusMap,
) -> Result<Vec<PendingProposal>, ScrapeError> {
    let doc = Html::parse_document(html);
    let section = find_required(
        doc.root_element(),
        &TagQuery::new("section").attr("id", "numerical-index"),
    )?;
    let table = find_required(section, &TagQuery::new("table"))?;

    let tr_selector = Selector::parse("tr").unwrap();
    let td_selector = Selector::parse("td").unwrap();
    let a_selector = Selector::parse("a").unwrap();

    let mut pending = Vec::new();
    for row in table.select(&tr_selector).skip(1) {
        let cells: Vec<_> = row.select(&td_selector).collect();
        let Some(code_cell) = cells.first() else {
            warn!("index row has no cells; skipping row");
            continue;
        };
        // drop the leading type glyph; what remains is the status code
        let code: String = code_cell
            .text()
            .collect::<String>()
            .trim()
            .chars()
            .skip(1)
            .collect();
        let expected = expected_status.get(&code).cloned().unwrap_or_default();
        if expected.is_empty() {
            warn!(code = %code, "unknown status code in proposal table");
        }

        let Some(anchor) = cells.get(1).and_then(|cell| cell.select(&a_selector).next()) else {
            warn!("index row has no proposal link; skipping row");
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            warn!("proposal link has no href; skipping row");
            continue;
        };
        match base.join(href) {
            Ok(link) => pending.push(PendingProposal { link, expected }),
            Err(e) => warn!(href, error = %e, "unresolvable proposal link; skipping row"),
        }
    }
    Ok(pending)
}

/// Second-pass page read: the trimmed text of the `<dd>` paired with
/// the `Status:` term in the article's field list, or `None` when the
/// field list has no such term.
fn page_status(html: &str) -> Result<Option<String>, ScrapeError> {
    let doc = Html::parse_document(html);
    let article = find_required(doc.root_element(), &TagQuery::new("article"))?;
    let field_list = find_required(article, &TagQuery::new("dl"))?;

    let dt_selector = Selector::parse("dt").unwrap();
    let dd_selector = Selector::parse("dd").unwrap();
    for (dt, dd) in field_list
        .select(&dt_selector)
        .zip(field_list.select(&dd_selector))
    {
        if dt.text().collect::<String>().trim() == "Status:" {
            return Ok(Some(dd.text().collect::<String>().trim().to_string()));
        }
    }
    Ok(None)
}
