//! Fetching the front page, with caching.
//!
//! [`DocumentSource`] hands out the parsed page. A fresh cached copy is
//! returned as-is; otherwise the page is fetched through a [`Transport`],
//! parsed, and stored for the next hour.
//!
//! There is no request coalescing: callers that all miss the cache at once
//! each fetch the page, and whichever store lands last stays cached.

use crate::cache::TimedCache;
use crate::config::ClientConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};
use url::Url;

/// Performs the single GET the client needs.
pub trait Transport {
    /// Fetch `url` and return the response body.
    ///
    /// Any failure, including a non-success status, is an
    /// [`Error::Fetch`].
    fn get(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the timeout and user agent from `config`.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Fetch {
                url: config.url.to_string(),
                reason: format!("couldn't build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        let fail = |e: reqwest::Error| Error::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let rsp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fail)?
            .error_for_status()
            .map_err(fail)?;
        debug!(status = %rsp.status(), "Got response");

        let body = rsp.bytes().await.map_err(fail)?;
        Ok(body.to_vec())
    }
}

/// The parsed front page, cached for [`CACHE_TTL`](crate::cache::CACHE_TTL).
///
/// Safe to share between tasks; the cache is the only shared state.
#[derive(Debug)]
pub struct DocumentSource<T = HttpTransport> {
    url: Url,
    transport: T,
    cache: TimedCache<Document>,
}

impl<T: Transport> DocumentSource<T> {
    /// An empty-cached source for `url`.
    pub fn new(url: Url, transport: T) -> Self {
        Self {
            url,
            transport,
            cache: TimedCache::default(),
        }
    }

    /// The address fetched on a cache miss.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Return the current page, fetching it if the cache is empty or stale.
    ///
    /// # Returns
    ///
    /// A shared handle; callers within the same hour get the same `Arc`.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] if the request fails, [`Error::Parse`] if the body
    /// is empty. Neither outcome touches the cache.
    #[instrument(level = "info", skip_all, fields(url = %self.url))]
    pub async fn get(&self) -> Result<Arc<Document>> {
        if let Some(doc) = self.cache.load() {
            debug!("Using cached page");
            return Ok(doc);
        }

        let t0 = Instant::now();
        let body = self.transport.get(&self.url).await?;
        let doc = Arc::new(Document::parse_bytes(&body)?);
        self.cache.store(Arc::clone(&doc), Utc::now());

        info!(
            bytes = body.len(),
            nodes = doc.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched and cached page"
        );
        Ok(doc)
    }

    /// Forget the cached page so the next [`get`](Self::get) fetches.
    pub fn invalidate(&self) {
        self.cache.clear();
    }
}
