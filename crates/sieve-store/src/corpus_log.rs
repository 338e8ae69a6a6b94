use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Append-only record of accepted pages, one `<url> -> <token count>` line each.
///
/// Entries are never rewritten or deduplicated, a page recorded twice appears twice.
#[derive(Debug)]
pub struct CorpusLog {
    path: PathBuf,
    file: fs_err::File,
}

impl CorpusLog {
    /// Opens the log for appending, creating it when missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = fs_err::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, url: &str, token_count: usize) -> Result<()> {
        // One write per record
        let line = format!("{url} -> {token_count}\n");
        self.file.write_all(line.as_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}
