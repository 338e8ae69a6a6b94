//! HTML pages parsed for crawling.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Invalid anchor selector"));

/// A parsed HTML page.
///
/// Parsing does not fail hard. Malformed markup is repaired the way browsers repair it and the
/// tree is populated as best as possible, so every page yields links and text.
#[derive(Debug, Clone)]
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses raw markup, replacing invalid UTF-8 sequences.
    pub fn parse(markup: &[u8]) -> Self {
        Self::parse_str(&String::from_utf8_lossy(markup))
    }

    pub fn parse_str(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Returns the verbatim `href` of every anchor in document order.
    ///
    /// Anchors without an `href` attribute are skipped.
    pub fn links(&self) -> Vec<String> {
        self.html
            .root_element()
            .select(&ANCHOR)
            .filter_map(|a| a.value().attr("href"))
            .map(String::from)
            .collect()
    }

    /// Returns the content of every text node, concatenated in document order.
    pub fn text(&self) -> String {
        self.html.root_element().text().collect()
    }
}

/// Parses `markup` and returns its anchor targets, see [`Page::links`].
pub fn extract_links(markup: &[u8]) -> Vec<String> {
    Page::parse(markup).links()
}

/// Parses `markup` and returns its plain text, see [`Page::text`].
pub fn extract_text(markup: &[u8]) -> String {
    Page::parse(markup).text()
}
