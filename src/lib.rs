//! Turns recipe pages from many different cooking sites into one canonical
//! record.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recipe = cooklang_scrape::scrape("https://cooking.nytimes.com/recipes/1015819").await?;
//! println!("{} serves {}", recipe.name, recipe.recipe_yield);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod fields;
pub mod handlers;
pub mod host;
pub mod model;
pub mod normalize;
pub mod query;
pub mod registry;
pub mod scrape;
pub mod strategies;

pub use config::ScraperConfig;
pub use document::Document;
pub use error::{Result, ScrapeError};
pub use fetcher::{FetchResponse, Fetcher, RequestFetcher};
pub use handlers::default_registry;
pub use host::host_key;
pub use model::{HowToItem, Nutrition, Recipe, Video};
pub use registry::{Handler, Registry};
pub use scrape::{scrape, scrape_document, Scraper};
