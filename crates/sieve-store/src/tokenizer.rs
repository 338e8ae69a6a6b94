//! Word tokenization.
//!
//! A token is a maximal run of ASCII letters and digits, lower-cased. Everything else,
//! including non-ASCII letters, separates tokens.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+").expect("Invalid word regex"));

/// Returns the lower-cased tokens of `text` in order of appearance.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text).map(|m| m.as_str().to_ascii_lowercase())
}
