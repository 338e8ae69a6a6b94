use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::StoreConfig;
use crate::corpus_log::CorpusLog;
use crate::error::Result;
use crate::frequency::FrequencyStore;

/// Destination of accepted pages.
pub trait CorpusSink {
    /// Records the text of an accepted page and returns its token count.
    ///
    /// [`Corpus`] saves the frequency snapshot before appending the log line: when the append
    /// fails the page is counted but not logged, and the error is returned.
    fn record(&mut self, url: &str, text: &str) -> Result<usize>;
}

/// Durable corpus statistics: word frequencies plus the corpus log.
#[derive(Debug)]
pub struct Corpus {
    frequencies: FrequencyStore,
    log: CorpusLog,
}

impl Corpus {
    pub fn new(frequencies: FrequencyStore, log: CorpusLog) -> Self {
        Self { frequencies, log }
    }

    pub fn open(config: &StoreConfig) -> Result<Self> {
        Ok(Self {
            frequencies: FrequencyStore::new(&config.frequencies),
            log: CorpusLog::open(&config.corpus_log)?,
        })
    }

    pub fn frequencies(&self) -> &FrequencyStore {
        &self.frequencies
    }

    pub fn log(&self) -> &CorpusLog {
        &self.log
    }
}

impl CorpusSink for Corpus {
    fn record(&mut self, url: &str, text: &str) -> Result<usize> {
        let token_count = self.frequencies.count_and_accumulate(text)?;
        self.log.append(url, token_count)?;
        Ok(token_count)
    }
}

/// A [`Corpus`] shared between concurrent callers.
///
/// The lock is held across the whole snapshot read-modify-write and the log append.
#[derive(Debug, Clone)]
pub struct SharedCorpus {
    inner: Arc<Mutex<Corpus>>,
}

impl SharedCorpus {
    pub fn new(corpus: Corpus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(corpus)),
        }
    }
}

impl From<Corpus> for SharedCorpus {
    fn from(corpus: Corpus) -> Self {
        Self::new(corpus)
    }
}

impl CorpusSink for SharedCorpus {
    fn record(&mut self, url: &str, text: &str) -> Result<usize> {
        self.inner.lock().record(url, text)
    }
}
