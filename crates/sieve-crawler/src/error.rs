use sieve_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid page URL {url:?}: {source}")]
    InvalidPageUrl {
        url: String,
        source: url::ParseError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
