use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};

/// Status and raw body of a fetched page.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// For handlers that talk to a site's backing API: a non-2xx answer
    /// becomes an error naming the status and URL.
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ScrapeError::UpstreamApi {
                status: self.status,
                url: url.to_string(),
            })
        }
    }
}

/// Retrieves page bodies. Only transport failures are errors; what to do with
/// a non-2xx status is up to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Self::with_config(&ScraperConfig {
            timeout: timeout.unwrap_or(Duration::from_secs(30)).as_secs(),
            ..ScraperConfig::default()
        })
    }

    pub fn with_config(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let wrap = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(wrap)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(wrap)?.to_vec();
        debug!("Fetched {url}: status {status}, {} bytes", body.len());
        Ok(FetchResponse { status, body })
    }
}
