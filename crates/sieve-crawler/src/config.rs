use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sieve_store::StoreConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default)]
    pub scope: ScopeConfig,

    #[serde(default)]
    pub quality: QualityConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Which URLs are worth enqueuing.
///
/// Extensions are matched lower-cased, entries are expected in lower case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeConfig {
    /// Hosts must equal one of these or be a `.`-bounded subdomain of it
    #[serde(default = "default_allowed_domain_suffixes")]
    pub allowed_domain_suffixes: BTreeSet<String>,

    /// A host outside the allowed domains that is crawled under one path only
    #[serde(default = "default_special_case")]
    pub special_case: Option<PathRestriction>,

    /// Substrings that disqualify a query string
    #[serde(default = "default_query_blacklist")]
    pub query_blacklist: BTreeSet<String>,

    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: BTreeSet<String>,

    #[serde(default = "default_denied_extensions")]
    pub denied_extensions: BTreeSet<String>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allowed_domain_suffixes: default_allowed_domain_suffixes(),
            special_case: default_special_case(),
            query_blacklist: default_query_blacklist(),
            allowed_extensions: default_allowed_extensions(),
            denied_extensions: default_denied_extensions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRestriction {
    pub host: String,
    pub path_substring: String,
}

fn set_of(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_allowed_domain_suffixes() -> BTreeSet<String> {
    set_of(&[
        "ics.uci.edu",
        "cs.uci.edu",
        "informatics.uci.edu",
        "stat.uci.edu",
    ])
}

fn default_special_case() -> Option<PathRestriction> {
    Some(PathRestriction {
        host: String::from("today.uci.edu"),
        path_substring: String::from("department/information_computer_sciences"),
    })
}

fn default_query_blacklist() -> BTreeSet<String> {
    set_of(&["replytocom=", "share=", "ical=", "outlook-ical=", "tribe-bar-date="])
}

fn default_allowed_extensions() -> BTreeSet<String> {
    set_of(&["htm", "html", "php", "txt"])
}

fn default_denied_extensions() -> BTreeSet<String> {
    set_of(&[
        "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2",
        "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf",
        "ps", "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat",
        "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf",
        "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf",
        "wma", "zip", "rar", "gz",
    ])
}

/// Thresholds a page's plain text must pass to be indexed and crawled further.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityConfig {
    /// Text length over raw content length, exclusive
    #[serde(default = "default_min_text_ratio")]
    pub min_text_ratio: f64,

    /// Minimum number of text characters, inclusive
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_text_ratio: default_min_text_ratio(),
            min_text_length: default_min_text_length(),
        }
    }
}

fn default_min_text_ratio() -> f64 {
    0.06
}

fn default_min_text_length() -> usize {
    1000
}
