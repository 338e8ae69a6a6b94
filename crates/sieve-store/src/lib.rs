mod config;
mod corpus;
mod corpus_log;
mod error;
mod frequency;
pub mod tokenizer;

pub use config::StoreConfig;
pub use corpus::{Corpus, CorpusSink, SharedCorpus};
pub use corpus_log::CorpusLog;
pub use error::{Result, StoreError};
pub use frequency::{count_and_accumulate, FrequencyStore, WordFrequencyTable};
