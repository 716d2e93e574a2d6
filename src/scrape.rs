use std::sync::Arc;

use log::{debug, error};

use crate::config::ScraperConfig;
use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::fetcher::{Fetcher, RequestFetcher};
use crate::handlers::default_registry;
use crate::host::host_key;
use crate::model::Recipe;
use crate::registry::Registry;

/// Fetches a page and turns it into a canonical record via the handler
/// registered for its host.
///
/// Holds no per-request state; one `Scraper` can serve concurrent scrapes.
pub struct Scraper {
    registry: Arc<Registry>,
    fetcher: Arc<dyn Fetcher>,
    max_body_bytes: usize,
}

impl Scraper {
    pub fn new(registry: Registry, fetcher: impl Fetcher + 'static) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher: Arc::new(fetcher),
            max_body_bytes: ScraperConfig::default().max_body_bytes,
        }
    }

    /// Bundled handlers plus an HTTP fetcher built from `config`.
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let fetcher = RequestFetcher::with_config(config)?;
        Ok(Self {
            max_body_bytes: config.max_body_bytes,
            ..Self::new(default_registry(), fetcher)
        })
    }

    /// Like [`Scraper::from_config`], with settings read from `config.toml`
    /// and `COOKLANG__SCRAPER__*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ScraperConfig::load()?)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// True when a handler is registered for the URL's host.
    pub fn supports(&self, url: &str) -> bool {
        self.registry.contains(&host_key(url))
    }

    /// Scrapes `url`.
    ///
    /// Fetch and parse failures are errors carrying the URL; an unknown host
    /// comes back as [`ScrapeError::UnsupportedSite`] unchanged.
    pub async fn scrape(&self, url: &str) -> Result<Recipe> {
        let response = self.fetcher.fetch(url).await?;
        self.scrape_body(url, response.body).await
    }

    /// Runs parsing and extraction on an already fetched body.
    pub async fn scrape_body(&self, url: &str, body: Vec<u8>) -> Result<Recipe> {
        if body.len() > self.max_body_bytes {
            return Err(ScrapeError::Parse {
                url: url.to_string(),
                reason: format!(
                    "body of {} bytes exceeds the {} byte limit",
                    body.len(),
                    self.max_body_bytes
                ),
            });
        }

        // The parsed DOM is not Send, so it lives and dies on a blocking
        // thread; field units interleave there.
        let registry = Arc::clone(&self.registry);
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            futures::executor::block_on(extract(&registry, &url, &body))
        })
        .await
        .map_err(|e| {
            error!("Extraction task failed: {e}");
            ScrapeError::Runtime(e.to_string())
        })?
    }
}

async fn extract(registry: &Registry, url: &str, body: &[u8]) -> Result<Recipe> {
    let doc = Document::from_bytes(url, body)?;
    scrape_document(registry, url, &doc).await
}

/// Resolves the host, dispatches to its handler and backfills the record's
/// URL with the requested one when the handler left it empty.
pub async fn scrape_document(registry: &Registry, url: &str, doc: &Document) -> Result<Recipe> {
    let key = host_key(url);
    debug!("Resolved {url} to host key {key:?}");

    let mut recipe = registry.dispatch(&key, doc).await?;
    if recipe.url.is_empty() {
        recipe.url = url.to_string();
    }
    Ok(recipe)
}

/// Scrapes `url` with the bundled handlers and default settings.
pub async fn scrape(url: &str) -> Result<Recipe> {
    Scraper::from_config(&ScraperConfig::default())?
        .scrape(url)
        .await
}
