//! Hyperlink normalization.
//!
//! Turns the raw `href` of an anchor into an absolute, fragment-free URL:
//!
//! - `%7e`/`%7E` is decoded to `~`, other escapes are left alone
//! - the fragment is dropped
//! - absolute references are kept as written, protocol-relative ones get `https:`
//! - hostless references containing `@` are mail addresses and dropped
//! - relative references are resolved against the page they were found on, root-relative
//!   ones at the site root and path-relative ones at the page itself

use std::fmt;

use serde::Serialize;
use url::{ParseError, Url};

use crate::error::{Error, Result};

/// An absolute, fragment-free and trimmed URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedLink(String);

impl NormalizedLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NormalizedLink> for String {
    fn from(link: NormalizedLink) -> Self {
        link.0
    }
}

impl PartialEq<str> for NormalizedLink {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedLink {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Normalizes the links found on one page.
#[derive(Debug, Clone)]
pub struct Normalizer {
    page: Url,
}

impl Normalizer {
    /// Fails when `page_url` itself is not a valid absolute URL.
    pub fn new(page_url: &str) -> Result<Self> {
        let page = Url::parse(page_url).map_err(|source| Error::InvalidPageUrl {
            url: page_url.to_string(),
            source,
        })?;
        Ok(Self { page })
    }

    pub fn page(&self) -> &Url {
        &self.page
    }

    /// Returns `None` for references that don't designate another page or can't be parsed.
    pub fn normalize(&self, raw_ref: &str) -> Option<NormalizedLink> {
        let reference = raw_ref.trim();
        if reference.is_empty() {
            return None;
        }
        let reference = decode_tilde(reference);
        let reference = match reference.split_once('#') {
            Some((reference, _fragment)) => reference,
            None => reference.as_str(),
        };
        if reference.is_empty() {
            return None;
        }

        let resolved = if reference.starts_with("//") {
            let absolute = format!("https:{reference}");
            match Url::parse(&absolute) {
                Ok(url) if url.has_host() => absolute,
                Ok(_) => return None,
                Err(e) => return self.skip(raw_ref, e),
            }
        } else {
            match Url::parse(reference) {
                Ok(url) if url.has_host() => reference.to_string(),
                Ok(_) if reference.contains('@') => return None,
                Ok(url) => url.to_string(),
                Err(ParseError::RelativeUrlWithoutBase) if reference.contains('@') => return None,
                Err(ParseError::RelativeUrlWithoutBase) if reference.starts_with('/') => {
                    match self.root_relative(reference) {
                        Some(url) => url.to_string(),
                        None => return self.skip(raw_ref, ParseError::RelativeUrlWithoutBase),
                    }
                }
                // RFC 3986 resolution against the current page, dot segments collapsed
                Err(ParseError::RelativeUrlWithoutBase) => match self.page.join(reference) {
                    Ok(url) => url.to_string(),
                    Err(e) => return self.skip(raw_ref, e),
                },
                Err(e) => return self.skip(raw_ref, e),
            }
        };

        let resolved = resolved.trim();
        if resolved.is_empty() {
            None
        } else {
            Some(NormalizedLink(resolved.to_string()))
        }
    }

    /// Anchors `/path?query` at the page's own origin.
    ///
    /// `Url::join` would read `/\host` or `/<tab>/host` as protocol-relative and switch hosts.
    fn root_relative(&self, reference: &str) -> Option<Url> {
        if self.page.cannot_be_a_base() {
            return None;
        }
        let (path, query) = match reference.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (reference, None),
        };
        let mut url = self.page.clone();
        url.set_path(path);
        url.set_query(query);
        Some(url)
    }

    fn skip(&self, raw_ref: &str, e: ParseError) -> Option<NormalizedLink> {
        log::warn!("Skipping link {raw_ref:?} on {} got: {e}", self.page);
        None
    }
}

/// Normalizes `raw_ref` found on `page_url`, see [`Normalizer::normalize`].
pub fn normalize(page_url: &str, raw_ref: &str) -> Result<Option<NormalizedLink>> {
    Ok(Normalizer::new(page_url)?.normalize(raw_ref))
}

fn decode_tilde(reference: &str) -> String {
    reference.replace("%7e", "~").replace("%7E", "~")
}
