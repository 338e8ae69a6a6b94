use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Append-only `<url> -> <tokens>` log
    #[serde(default = "default_corpus_log")]
    pub corpus_log: PathBuf,

    /// Word frequency snapshot, rewritten on every accepted page
    #[serde(default = "default_frequencies")]
    pub frequencies: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            corpus_log: default_corpus_log(),
            frequencies: default_frequencies(),
        }
    }
}

fn default_corpus_log() -> PathBuf {
    PathBuf::from("urls.txt")
}

fn default_frequencies() -> PathBuf {
    PathBuf::from("wordfreqs.json")
}
