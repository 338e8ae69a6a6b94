use std::collections::btree_map::{self, BTreeMap};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Result, StoreError};
use crate::tokenizer;

/// Corpus-wide word counts.
///
/// Counts only ever grow: entries are created at 1 and never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencyTable {
    counts: BTreeMap<String, u64>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of `word`, zero when it was never seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, u64> {
        self.counts.iter()
    }

    pub fn increment(&mut self, word: String) {
        *self.counts.entry(word).or_insert(0) += 1;
    }

    /// Tokenizes `text`, counts every token and returns the number of tokens.
    pub fn accumulate(&mut self, text: &str) -> usize {
        let mut count = 0;
        for token in tokenizer::tokens(text) {
            self.increment(token);
            count += 1;
        }
        count
    }
}

impl<'a> IntoIterator for &'a WordFrequencyTable {
    type Item = (&'a String, &'a u64);
    type IntoIter = btree_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Counts the tokens of `text` into `table` and returns how many there were.
pub fn count_and_accumulate(text: &str, table: &mut WordFrequencyTable) -> usize {
    table.accumulate(text)
}

/// A [`WordFrequencyTable`] persisted as a JSON snapshot.
///
/// Each update reads the whole snapshot, mutates it and writes it back whole. Updates take
/// `&mut self`, concurrent writers must go through [`SharedCorpus`](crate::SharedCorpus) or
/// an equivalent lock.
#[derive(Debug)]
pub struct FrequencyStore {
    path: PathBuf,
}

impl FrequencyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. A missing or empty file is an empty table.
    pub fn load(&self) -> Result<WordFrequencyTable> {
        let content = match fs_err::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(WordFrequencyTable::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(WordFrequencyTable::new());
        }
        serde_json::from_str(&content).map_err(|source| StoreError::Snapshot {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the snapshot with `table`.
    ///
    /// The table is written to a temporary file next to the snapshot and renamed over it, a
    /// failed write leaves the previous snapshot in place.
    pub fn save(&self, table: &WordFrequencyTable) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut wtr = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut wtr, table).map_err(|source| StoreError::Snapshot {
                path: self.path.clone(),
                source,
            })?;
            wtr.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }

    /// Counts the tokens of `text` into the persisted table and returns how many there were.
    pub fn count_and_accumulate(&mut self, text: &str) -> Result<usize> {
        let mut table = self.load()?;
        let count = table.accumulate(text);
        self.save(&table)?;
        log::debug!(
            "Counted {count} tokens, {} distinct words in {}",
            table.len(),
            self.path.display()
        );
        Ok(count)
    }
}
