use sieve_scraper::Page;
use sieve_store::CorpusSink;

use crate::config::{CrawlerConfig, QualityConfig, ScopeConfig};
use crate::error::Result;
use crate::fetch::FetchResult;
use crate::gate::{self, Inadmissible};
use crate::normalize::{NormalizedLink, Normalizer};
use crate::scope;

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// The fetch can't be used
    Inadmissible(Inadmissible),
    /// Too little text to be indexed or crawled further
    Uninformative {
        text_length: usize,
        content_length: usize,
    },
    /// Recorded in the corpus, with its in-scope links in document order
    Accepted {
        token_count: usize,
        links: Vec<NormalizedLink>,
    },
}

impl PageOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Links to hand to the frontier, empty unless accepted.
    pub fn links(&self) -> &[NormalizedLink] {
        match self {
            Self::Accepted { links, .. } => links,
            _ => &[],
        }
    }
}

/// Decides what to keep from each fetched page.
///
/// Holds read-only configuration only, one processor can serve any number of threads. The
/// corpus passed to [`PageProcessor::process`] is where shared state lives.
#[derive(Debug, Clone, Default)]
pub struct PageProcessor {
    scope: ScopeConfig,
    quality: QualityConfig,
}

impl PageProcessor {
    pub fn new(scope: ScopeConfig, quality: QualityConfig) -> Self {
        Self { scope, quality }
    }

    /// Runs one page fetched from `page_url` through the gates, records it into `corpus`
    /// when accepted and returns the links worth following.
    ///
    /// Fails when `page_url` can't be parsed, before anything is recorded, or when the
    /// corpus can't be updated. Rejections are regular outcomes.
    pub fn process<S>(
        &self,
        page_url: &str,
        fetch: &FetchResult,
        corpus: &mut S,
    ) -> Result<PageOutcome>
    where
        S: CorpusSink + ?Sized,
    {
        let normalizer = Normalizer::new(page_url)?;

        if let Err(reason) = gate::check(fetch, &self.scope) {
            log::debug!("Skipping page {page_url}: {reason}");
            return Ok(PageOutcome::Inadmissible(reason));
        }
        let content = fetch.raw_content.as_deref().unwrap_or_default();

        let page = Page::parse(content);
        let text = page.text();
        if !gate::is_informative(&text, content, &self.quality) {
            let text_length = text.chars().count();
            log::debug!(
                "Skipping page {page_url}: {text_length} text chars in {} bytes",
                content.len()
            );
            return Ok(PageOutcome::Uninformative {
                text_length,
                content_length: content.len(),
            });
        }

        // Serialized form, so the log line stays a single `<url> -> <count>` record
        let token_count = corpus.record(normalizer.page().as_str(), &text)?;

        let links = page
            .links()
            .iter()
            .filter_map(|raw_ref| normalizer.normalize(raw_ref))
            .filter(|link| match scope::check(link.as_str(), &self.scope) {
                Ok(()) => true,
                Err(rejection) => {
                    log::debug!("Rejecting link {link}: {rejection}");
                    false
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "Accepted page {page_url}: {token_count} tokens, {} links",
            links.len()
        );

        Ok(PageOutcome::Accepted { token_count, links })
    }
}

impl From<&CrawlerConfig> for PageProcessor {
    fn from(config: &CrawlerConfig) -> Self {
        Self::new(config.scope.clone(), config.quality)
    }
}
