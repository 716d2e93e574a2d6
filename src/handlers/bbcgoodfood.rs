use async_trait::async_trait;

use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::model::Recipe;
use crate::registry::Handler;
use crate::strategies::from_graph;

/// bbcgoodfood.com wraps its entities in a single `@graph` envelope.
pub struct BbcGoodFood;

#[async_trait(?Send)]
impl Handler for BbcGoodFood {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        let payload = doc.json_ld().ok_or(ScrapeError::NoRecipe)?;
        from_graph(&payload)
    }
}
