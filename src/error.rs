use thiserror::Error;

/// Errors that can occur while scraping a recipe
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport failure while fetching the page
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The fetched body could not be turned into a document
    #[error("Failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// Top-level structured data could not be decoded
    #[error("Failed to decode structured data: {0}")]
    Decode(#[from] serde_json::Error),

    /// Structured data declared a type other than Recipe
    #[error("Structured data is of type {0:?}, expected \"Recipe\"")]
    NotARecipe(String),

    /// No recipe entity could be found in the structured data
    #[error("No recipe found in structured data")]
    NoRecipe,

    /// No handler is registered for the resolved host key
    #[error("No handler registered for host key {0:?}")]
    UnsupportedSite(String),

    /// A site's backing API answered with a non-success status
    #[error("Upstream API returned status {status} for {url}")]
    UpstreamApi { status: u16, url: String },

    /// The extraction task could not be joined
    #[error("Extraction task failed: {0}")]
    Runtime(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ScrapeError {
    /// True when the URL simply belongs to a site without a handler
    pub fn is_unsupported_site(&self) -> bool {
        matches!(self, ScrapeError::UnsupportedSite(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
