//! HTTP access with a URL-keyed disk cache.
//!
//! [`CachedClient`] memoizes GET responses: the first request for a URL
//! hits the network and stores the body under the cache directory; any
//! later request for the same URL is served from disk without touching
//! the network. Entries live until `--clear-cache` removes them.
//!
//! Response bodies are decoded as UTF-8 regardless of what the server
//! claims, so the documentation pages' declared charsets cannot skew
//! the parse.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, error, info};

use crate::errors::ScrapeError;

/// A `reqwest` client plus the disk cache it reads through.
#[derive(Debug)]
pub struct CachedClient {
    client: reqwest::Client,
    cache_dir: PathBuf,
}

impl CachedClient {
    pub fn new(cache_dir: PathBuf) -> Self {
        CachedClient {
            client: reqwest::Client::new(),
            cache_dir,
        }
    }

    /// Where the body for `url` is (or would be) stored.
    fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(urlencoding::encode(url).as_ref())
    }

    /// Cached GET. Network and HTTP-status failures propagate; use
    /// [`CachedClient::fetch`] where a bad page should be skipped
    /// instead.
    pub async fn get(&self, url: &str) -> Result<String, ScrapeError> {
        let path = self.cache_path(url);
        if let Ok(body) = fs::read_to_string(&path).await {
            debug!(%url, "serving response from cache");
            return Ok(body);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::BadStatus {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        fs::create_dir_all(&self.cache_dir).await?;
        fs::write(&path, &body).await?;
        debug!(%url, bytes = body.len(), "fetched and cached response body");
        Ok(body)
    }

    /// The page-load contract used by the extractors.
    ///
    /// # Returns
    ///
    /// The response body on success, `None` on any failure. Failures
    /// are logged here and never propagate; a `None` means "skip this
    /// page".
    pub async fn fetch(&self, url: &str) -> Option<String> {
        match self.get(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                error!(%url, error = %e, "failed to load page");
                None
            }
        }
    }

    /// Direct GET bypassing the cache, for binary artifacts. Errors
    /// propagate to the caller.
    pub async fn get_bytes_uncached(&self, url: &str) -> Result<Vec<u8>, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::BadStatus {
                url: url.to_string(),
                status,
            });
        }
        let bytes = response.bytes().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) -> Result<(), ScrapeError> {
        match fs::remove_dir_all(&self.cache_dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.cache_dir).await?;
        info!(cache_dir = %self.cache_dir.display(), "HTTP cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_dir(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pydocs_scrape_test_{label}_{}", std::process::id()))
    }

    #[test]
    fn test_cache_key_is_filesystem_safe() {
        let client = CachedClient::new(PathBuf::from("/tmp/cache"));
        let path = client.cache_path("https://docs.python.org/3/whatsnew/");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.contains('/'));
        assert!(name.contains("docs.python.org"));
        // distinct URLs get distinct keys
        let other = client.cache_path("https://docs.python.org/3/download.html");
        assert_ne!(path, other);
    }

    #[tokio::test]
    async fn test_cached_body_is_served_without_network() {
        let dir = temp_cache_dir("hit");
        let client = CachedClient::new(dir.clone());
        let url = "https://docs.invalid/page.html";

        // seed the cache by hand; the URL does not resolve, so a body
        // coming back proves the network was never consulted
        fs::create_dir_all(&dir).await.unwrap();
        fs::write(client.cache_path(url), "<html>stored</html>")
            .await
            .unwrap();

        let body = client.get(url).await.unwrap();
        assert_eq!(body, "<html>stored</html>");
        assert_eq!(client.fetch(url).await.as_deref(), Some("<html>stored</html>"));

        fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_returns_none_on_network_failure() {
        let dir = temp_cache_dir("miss");
        let client = CachedClient::new(dir.clone());
        // unresolvable host, nothing cached
        assert!(client.fetch("https://does-not-exist.invalid/x").await.is_none());
        let _ = fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn test_clear_cache_removes_entries() {
        let dir = temp_cache_dir("clear");
        let client = CachedClient::new(dir.clone());
        let url = "https://docs.invalid/cached.html";

        fs::create_dir_all(&dir).await.unwrap();
        fs::write(client.cache_path(url), "body").await.unwrap();
        client.clear_cache().await.unwrap();

        assert!(!client.cache_path(url).exists());
        assert!(dir.exists());

        // clearing an already-empty cache is fine too
        client.clear_cache().await.unwrap();
        fs::remove_dir_all(&dir).await.unwrap();
    }
}
