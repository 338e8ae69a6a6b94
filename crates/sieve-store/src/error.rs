use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Invalid frequency snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Couldn't replace frequency snapshot {}: {source}", path.display())]
    Persist { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, StoreError>;
