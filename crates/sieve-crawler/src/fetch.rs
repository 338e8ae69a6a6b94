/// Response headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Returns the first value of header `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One completed, or failed, fetch of a page.
///
/// Produced by the fetch layer. A failed fetch has no `raw_content` and usually no
/// `resolved_url`.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    pub status_code: u16,
    pub headers: Headers,
    pub raw_content: Option<Vec<u8>>,
    /// The URL the content was served from, after redirects
    pub resolved_url: Option<String>,
}

impl FetchResult {
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }
}
