use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

/// A parsed page. Read-only for the whole scrape.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Parses a fetched body. Bodies that are not valid UTF-8 are rejected.
    pub fn from_bytes(url: &str, body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body).map_err(|e| ScrapeError::Parse {
            url: url.to_string(),
            reason: format!("body is not valid UTF-8: {e}"),
        })?;
        Ok(Self::parse(text))
    }

    /// The `<html>` element; every query starts here.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Raw contents of every JSON-LD script, in source order.
    pub fn json_ld_blocks(&self) -> Vec<String> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();
        self.html
            .select(&selector)
            .map(|script| script.text().collect::<String>())
            .collect()
    }

    /// The first JSON-LD script, if the page has one.
    pub fn json_ld(&self) -> Option<String> {
        self.json_ld_blocks().into_iter().next()
    }

    /// Content of `<meta property=..>` or `<meta name=..>`.
    pub fn meta(&self, key: &str) -> String {
        crate::query::find_all(self.root(), |el| {
            el.value().name() == "meta"
                && (el.value().attr("property") == Some(key) || el.value().attr("name") == Some(key))
        })
        .into_iter()
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(crate::normalize::clean_text)
        .unwrap_or_default()
    }
}
