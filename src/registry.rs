use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use log::debug;

use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::model::Recipe;

/// Site-specific glue turning one site's page into a canonical record.
///
/// Handlers may call any query primitive or strategy and post-process the
/// result (reformat dates, strip markup) before returning it. Futures are not
/// `Send`: the parsed page is shared by reference across field units.
#[async_trait(?Send)]
pub trait Handler: Send + Sync {
    async fn scrape(&self, doc: &Document) -> Result<Recipe>;
}

/// Lookup table from host key to handler.
///
/// Supporting a new site is one [`Registry::register`] call; nothing else
/// changes.
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `key`, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<String>, handler: impl Handler + 'static) {
        self.handlers.insert(key.into(), Box::new(handler));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the one handler registered under `key`.
    pub async fn dispatch(&self, key: &str, doc: &Document) -> Result<Recipe> {
        let handler = self
            .handlers
            .get(key)
            .ok_or_else(|| ScrapeError::UnsupportedSite(key.to_string()))?;
        debug!("Dispatching to handler for {key:?}");
        handler.scrape(doc).await
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("keys", &self.keys())
            .finish()
    }
}
