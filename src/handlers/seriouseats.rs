use async_trait::async_trait;

use crate::document::Document;
use crate::error::Result;
use crate::model::Recipe;
use crate::registry::Handler;
use crate::strategies::from_array;

/// seriouseats.com publishes an array of entities; article pages without a
/// recipe yield an empty record.
pub struct SeriousEats;

#[async_trait(?Send)]
impl Handler for SeriousEats {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        match doc.json_ld() {
            Some(payload) => from_array(&payload),
            None => Ok(Recipe::default()),
        }
    }
}
