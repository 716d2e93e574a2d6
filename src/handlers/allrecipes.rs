use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;
use crate::model::Recipe;
use crate::registry::Handler;
use crate::strategies::from_scattered;

/// allrecipes.com ships several JSON-LD blocks per page, some of them
/// unrelated and some with raw newlines inside strings.
pub struct AllRecipes;

#[async_trait(?Send)]
impl Handler for AllRecipes {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        let mut recipe = from_scattered(doc)?;
        if recipe.image.is_empty() {
            recipe.image = doc.meta("og:image");
        }
        Ok(recipe)
    }
}
