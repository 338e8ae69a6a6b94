//! Scope and crawl trap filtering of normalized links.
//!
//! Checks run in order and stop at the first failure:
//!
//! 1. scheme is `http` or `https`
//! 2. a special-case host is only crawled under its path substring
//! 3. the host belongs to an allowed domain, matched on `.` boundaries
//! 4. the query holds no blacklisted substring
//! 5. no directory segment looks like a file and no segment repeats
//! 6. a terminal extension must be allowed, denied and unknown ones are rejected

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::ScopeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Unparseable,
    Scheme(String),
    MissingHost,
    RestrictedPath(String),
    Domain(String),
    Query(String),
    DottedSegment(String),
    RepeatedSegment(String),
    DeniedExtension(String),
    UnknownExtension(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unparseable => write!(f, "unparseable URL"),
            Self::Scheme(scheme) => write!(f, "scheme {scheme:?} is not http(s)"),
            Self::MissingHost => write!(f, "missing host"),
            Self::RestrictedPath(host) => write!(f, "path not crawled on {host}"),
            Self::Domain(host) => write!(f, "host {host} is out of scope"),
            Self::Query(needle) => write!(f, "query contains {needle:?}"),
            Self::DottedSegment(segment) => write!(f, "directory segment {segment:?} has a dot"),
            Self::RepeatedSegment(segment) => write!(f, "segment {segment:?} repeats"),
            Self::DeniedExtension(ext) => write!(f, "extension {ext:?} is denied"),
            Self::UnknownExtension(ext) => write!(f, "extension {ext:?} is not allowed"),
        }
    }
}

/// Returns whether `url` is in scope and safe to enqueue.
pub fn in_scope(url: &str, config: &ScopeConfig) -> bool {
    check(url, config).is_ok()
}

/// Returns the first rule `url` breaks.
pub fn check(url: &str, config: &ScopeConfig) -> Result<(), Rejection> {
    let url = Url::parse(url).map_err(|_| Rejection::Unparseable)?;

    match url.scheme() {
        "http" | "https" => (),
        scheme => return Err(Rejection::Scheme(scheme.to_string())),
    }

    let host = url.host_str().ok_or(Rejection::MissingHost)?;
    let path = url.path();

    match config
        .special_case
        .as_ref()
        .filter(|rule| within_domain(host, &rule.host))
    {
        Some(rule) => {
            if !path.contains(&rule.path_substring) {
                return Err(Rejection::RestrictedPath(host.to_string()));
            }
        }
        None => {
            if !config
                .allowed_domain_suffixes
                .iter()
                .any(|suffix| within_domain(host, suffix))
            {
                return Err(Rejection::Domain(host.to_string()));
            }
        }
    }

    if let Some(query) = url.query() {
        if let Some(needle) = config
            .query_blacklist
            .iter()
            .find(|needle| query.contains(needle.as_str()))
        {
            return Err(Rejection::Query(needle.clone()));
        }
    }

    let terminal = check_segments(path)?;
    check_extension(terminal, config)
}

/// Whether `host` is `domain` itself or one of its subdomains.
fn within_domain(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if domain.is_empty() {
        return false;
    }
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}

/// Walks the path segments and returns the terminal one.
///
/// The terminal segment is whatever follows the last `/`, so it is empty for paths ending
/// with a slash and every named segment is then a directory.
fn check_segments(path: &str) -> Result<&str, Rejection> {
    let (dirs, terminal) = path.rsplit_once('/').unwrap_or(("", path));

    let mut seen = HashSet::new();
    for segment in dirs.split('/').filter(|s| !s.is_empty()) {
        if segment.contains('.') {
            return Err(Rejection::DottedSegment(segment.to_string()));
        }
        if !seen.insert(segment) {
            return Err(Rejection::RepeatedSegment(segment.to_string()));
        }
    }
    if !terminal.is_empty() && !seen.insert(terminal) {
        return Err(Rejection::RepeatedSegment(terminal.to_string()));
    }

    Ok(terminal)
}

fn check_extension(terminal: &str, config: &ScopeConfig) -> Result<(), Rejection> {
    let ext = match terminal.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => return Ok(()),
    };

    if config.allowed_extensions.contains(&ext) {
        Ok(())
    } else if config.denied_extensions.contains(&ext) {
        Err(Rejection::DeniedExtension(ext))
    } else {
        Err(Rejection::UnknownExtension(ext))
    }
}
