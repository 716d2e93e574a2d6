use async_trait::async_trait;
use log::debug;

use crate::document::Document;
use crate::error::Result;
use crate::model::Recipe;
use crate::registry::Handler;
use crate::strategies::{from_microdata, from_scattered};

/// giallozafferano.it: recipe pages carry JSON-LD, older blog pages only
/// microdata.
pub struct GialloZafferano;

#[async_trait(?Send)]
impl Handler for GialloZafferano {
    async fn scrape(&self, doc: &Document) -> Result<Recipe> {
        match from_scattered(doc) {
            Ok(recipe) => Ok(recipe),
            Err(e) => {
                debug!("No JSON-LD recipe ({e}), trying microdata");
                from_microdata(doc).await
            }
        }
    }
}
