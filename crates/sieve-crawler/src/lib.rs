mod config;
mod crawler;
mod error;
mod fetch;
pub mod gate;
pub mod normalize;
pub mod scope;

pub use config::{CrawlerConfig, PathRestriction, QualityConfig, ScopeConfig};
pub use crawler::{PageOutcome, PageProcessor};
pub use error::{Error, Result};
pub use fetch::{FetchResult, Headers};
pub use gate::{admissible, is_informative, Inadmissible};
pub use normalize::{normalize, NormalizedLink, Normalizer};
pub use scope::{in_scope, Rejection};

pub use sieve_store;
