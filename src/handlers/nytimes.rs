use async_trait::async_trait;

use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::model::Recipe;
use crate::registry::Handler;
use crate::strategies::from_single;

/// cooking.nytimes.com: one Recipe object. Dates are cut down to the
/// calendar day, which is how the app has always shown NYT recipes.
pub struct NyTimesCooking;

#[async_trait(?Send)]
impl Handler for NyTimesCooking {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        let payload = doc.json_ld().ok_or(ScrapeError::NoRecipe)?;
        let mut recipe = from_single(&payload)?;
        recipe.date_published = calendar_day(&recipe.date_published);
        recipe.date_modified = calendar_day(&recipe.date_modified);
        Ok(recipe)
    }
}

fn calendar_day(timestamp: &str) -> String {
    timestamp
        .split_once('T')
        .map_or(timestamp, |(day, _)| day)
        .to_string()
}
