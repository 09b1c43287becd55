//! # pydocs_scrape
//!
//! Scrapes the Python documentation site and the PEP index for version
//! metadata, changelog summaries, and proposal-status tallies, and
//! renders the results to stdout, an aligned table, or a CSV file.
//!
//! ## Usage
//!
//! ```sh
//! pydocs_scrape whats-new
//! pydocs_scrape latest-versions --output pretty
//! pydocs_scrape pep --clear-cache --output file
//! pydocs_scrape download
//! ```
//!
//! ## Architecture
//!
//! One extractor per mode walks its page structure through a cached
//! HTTP client, strictly sequentially, and produces a uniform row
//! table the reporter renders:
//! 1. **Fetch**: cached GET; a failed page load is logged and skipped
//! 2. **Locate**: required tags found via typed queries; a miss is fatal
//! 3. **Extract**: rows accumulated in source-document order
//! 4. **Report**: stdout, table, or timestamped CSV

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod errors;
mod extractors;
mod http;
mod models;
mod outputs;
mod select;

use cli::{Cli, Mode, OutputFlag};
use config::AppConfig;
use errors::ScrapeError;
use http::CachedClient;
use outputs::OutputMode;

#[tokio::main]
async fn main() -> Result<(), ScrapeError> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("scraper starting up");

    let args = Cli::parse();
    debug!(?args, "parsed CLI arguments");

    let config = AppConfig::load(args.config.as_deref())?;
    let client = CachedClient::new(config.cache_dir.clone());
    if args.clear_cache {
        client.clear_cache().await?;
    }

    let results = match args.mode {
        Mode::WhatsNew => extractors::whats_new::scrape(&client, &config).await?,
        Mode::LatestVersions => extractors::latest_versions::scrape(&client, &config).await?,
        Mode::Download => extractors::download::scrape(&client, &config).await?,
        Mode::Pep => extractors::pep::scrape(&client, &config).await?,
    };

    if let Some(table) = results {
        let output = match args.output {
            None => OutputMode::Default,
            Some(OutputFlag::Pretty) => OutputMode::Pretty,
            Some(OutputFlag::File) => OutputMode::File,
        };
        outputs::control_output(&table, output, args.mode.as_str(), &config.results_dir()).await?;
    }

    info!("scraper finished");
    Ok(())
}
