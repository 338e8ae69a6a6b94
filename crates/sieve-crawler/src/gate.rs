//! Page-level admission: is a fetched page usable at all, and is its text worth keeping.

use std::fmt;

use crate::config::{QualityConfig, ScopeConfig};
use crate::fetch::FetchResult;
use crate::scope::{self, Rejection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inadmissible {
    NoContent,
    NoContentType,
    NotText(String),
    NoResolvedUrl,
    /// Redirected somewhere out of scope
    OutOfScope(Rejection),
    Status(u16),
}

impl fmt::Display for Inadmissible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoContent => write!(f, "no content"),
            Self::NoContentType => write!(f, "no content-type"),
            Self::NotText(content_type) => write!(f, "content-type {content_type:?} is not text"),
            Self::NoResolvedUrl => write!(f, "no resolved URL"),
            Self::OutOfScope(rejection) => write!(f, "resolved URL out of scope: {rejection}"),
            Self::Status(status) => write!(f, "status {status}"),
        }
    }
}

/// Returns whether content can be extracted from `fetch`.
pub fn admissible(fetch: &FetchResult, scope: &ScopeConfig) -> bool {
    check(fetch, scope).is_ok()
}

/// Returns the first reason `fetch` can't be used.
pub fn check(fetch: &FetchResult, scope: &ScopeConfig) -> Result<(), Inadmissible> {
    if fetch.raw_content.is_none() {
        return Err(Inadmissible::NoContent);
    }

    let content_type = fetch.content_type().ok_or(Inadmissible::NoContentType)?;
    if !content_type
        .trim_start()
        .to_ascii_lowercase()
        .starts_with("text")
    {
        return Err(Inadmissible::NotText(content_type.to_string()));
    }

    let resolved_url = fetch
        .resolved_url
        .as_deref()
        .ok_or(Inadmissible::NoResolvedUrl)?;
    scope::check(resolved_url, scope).map_err(Inadmissible::OutOfScope)?;

    if !(200..=299).contains(&fetch.status_code) {
        return Err(Inadmissible::Status(fetch.status_code));
    }

    Ok(())
}

/// Returns whether `text`, extracted from `raw_content`, is dense and long enough.
///
/// Lengths are counted in characters for the text and bytes for the raw content.
pub fn is_informative(text: &str, raw_content: &[u8], quality: &QualityConfig) -> bool {
    if raw_content.is_empty() {
        return false;
    }
    let text_length = text.chars().count();
    let ratio = text_length as f64 / raw_content.len() as f64;
    ratio > quality.min_text_ratio && text_length >= quality.min_text_length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Headers;

    fn html_page(status_code: u16, url: &str) -> FetchResult {
        FetchResult {
            status_code,
            headers: [("Content-Type", "text/html; charset=utf-8")]
                .into_iter()
                .collect(),
            raw_content: Some(b"<html></html>".to_vec()),
            resolved_url: Some(url.to_string()),
        }
    }

    fn verdict(fetch: &FetchResult) -> Result<(), Inadmissible> {
        check(fetch, &ScopeConfig::default())
    }

    #[test]
    fn accepts_html_page() {
        let fetch = html_page(200, "https://www.ics.uci.edu/");
        assert!(admissible(&fetch, &ScopeConfig::default()));
    }

    #[test]
    fn accepts_other_text() {
        let mut fetch = html_page(204, "https://www.ics.uci.edu/notes.txt");
        fetch.headers = [("content-type", "TEXT/plain")].into_iter().collect();
        assert_eq!(verdict(&fetch), Ok(()));
    }

    #[test]
    fn rejects_missing_content() {
        let fetch = FetchResult {
            raw_content: None,
            ..html_page(200, "https://www.ics.uci.edu/")
        };
        assert_eq!(verdict(&fetch), Err(Inadmissible::NoContent));
    }

    #[test]
    fn rejects_missing_content_type() {
        let fetch = FetchResult {
            headers: Headers::new(),
            ..html_page(200, "https://www.ics.uci.edu/")
        };
        assert_eq!(verdict(&fetch), Err(Inadmissible::NoContentType));
    }

    #[test]
    fn rejects_binary_content_type() {
        let mut fetch = html_page(200, "https://www.ics.uci.edu/");
        fetch.headers = Headers::new();
        fetch.headers.insert("Content-Type", "application/pdf");
        assert_eq!(
            verdict(&fetch),
            Err(Inadmissible::NotText("application/pdf".into()))
        );
    }

    #[test]
    fn rejects_redirect_out_of_scope() {
        let fetch = html_page(200, "https://www.google.com/");
        assert_eq!(
            verdict(&fetch),
            Err(Inadmissible::OutOfScope(Rejection::Domain(
                "www.google.com".into()
            )))
        );

        let fetch = FetchResult {
            resolved_url: None,
            ..html_page(200, "https://www.ics.uci.edu/")
        };
        assert_eq!(verdict(&fetch), Err(Inadmissible::NoResolvedUrl));
    }

    #[test]
    fn rejects_status() {
        for status in [0, 199, 301, 404, 500, 608] {
            let fetch = html_page(status, "https://www.ics.uci.edu/");
            assert_eq!(verdict(&fetch), Err(Inadmissible::Status(status)));
        }
        assert_eq!(verdict(&html_page(299, "https://www.ics.uci.edu/")), Ok(()));
    }

    #[test]
    fn informative_thresholds() {
        let quality = QualityConfig::default();
        let prose = "word ".repeat(300);
        let raw = vec![b'x'; 10_000];

        assert!(!is_informative("short", &raw, &quality));
        // 1500 chars over 10000 bytes
        assert!(is_informative(&prose, &raw, &quality));
        // Long enough but too diluted
        assert!(!is_informative(&prose, &vec![b'x'; 30_000], &quality));
        // Dense enough but too short
        assert!(!is_informative(&prose[..999], &raw[..1000], &quality));
        assert!(!is_informative("", &[], &quality));
    }

    #[test]
    fn informative_ratio_is_exclusive() {
        let quality = QualityConfig {
            min_text_ratio: 0.5,
            min_text_length: 2,
        };
        assert!(!is_informative("ab", b"abcd", &quality));
        assert!(is_informative("abc", b"abcd", &quality));
    }
}
