use std::fs;
use std::thread;

use sieve_store::{
    Corpus, CorpusLog, CorpusSink, FrequencyStore, SharedCorpus, StoreConfig, StoreError,
    WordFrequencyTable,
};

fn config_in(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig {
        corpus_log: dir.path().join("urls.txt"),
        frequencies: dir.path().join("wordfreqs.json"),
    }
}

#[test]
fn snapshot_missing_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FrequencyStore::new(dir.path().join("absent.json"));
    assert_eq!(store.load().unwrap(), WordFrequencyTable::new());
}

#[test]
fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordfreqs.json");

    let mut store = FrequencyStore::new(&path);
    assert_eq!(store.count_and_accumulate("The cat sat").unwrap(), 3);
    drop(store);

    let mut store = FrequencyStore::new(&path);
    assert_eq!(store.count_and_accumulate("the hat").unwrap(), 2);

    let table = store.load().unwrap();
    assert_eq!(table.get("the"), 2);
    assert_eq!(table.get("cat"), 1);
    assert_eq!(table.get("hat"), 1);
    assert_eq!(table.len(), 4);
}

#[test]
fn snapshot_corrupted_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordfreqs.json");
    fs::write(&path, "not json").unwrap();

    let mut store = FrequencyStore::new(&path);
    let err = store.count_and_accumulate("words").unwrap_err();
    assert!(matches!(err, StoreError::Snapshot { .. }), "{err:?}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
}

#[test]
fn log_appends_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");

    let mut log = CorpusLog::open(&path).unwrap();
    log.append("https://www.ics.uci.edu/a", 12).unwrap();
    log.append("https://www.ics.uci.edu/a", 12).unwrap();
    drop(log);

    let mut log = CorpusLog::open(&path).unwrap();
    log.append("https://cs.uci.edu/", 0).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "https://www.ics.uci.edu/a -> 12\n\
         https://www.ics.uci.edu/a -> 12\n\
         https://cs.uci.edu/ -> 0\n"
    );
}

#[test]
fn log_in_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let res = CorpusLog::open(dir.path().join("missing").join("urls.txt"));
    assert!(matches!(res, Err(StoreError::Io(_))));
}

#[test]
fn corpus_records_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let mut corpus = Corpus::open(&config).unwrap();
    let count = corpus
        .record("https://stat.uci.edu/", "Statistics at UCI, statistics!")
        .unwrap();
    assert_eq!(count, 4);

    let table = corpus.frequencies().load().unwrap();
    assert_eq!(table.get("statistics"), 2);
    assert_eq!(table.get("uci"), 1);
    assert_eq!(
        fs::read_to_string(&config.corpus_log).unwrap(),
        "https://stat.uci.edu/ -> 4\n"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn failed_log_append_after_snapshot_save() {
    if !std::path::Path::new("/dev/full").exists() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let frequencies = FrequencyStore::new(dir.path().join("wordfreqs.json"));
    let log = CorpusLog::open("/dev/full").unwrap();
    let mut corpus = Corpus::new(frequencies, log);

    let err = corpus.record("https://cs.uci.edu/", "alpha").unwrap_err();
    assert!(matches!(err, StoreError::Io(_)), "{err:?}");
    assert_eq!(corpus.frequencies().load().unwrap().get("alpha"), 1);
}

#[test]
fn shared_corpus_keeps_every_update() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let corpus = SharedCorpus::new(Corpus::open(&config).unwrap());

    thread::scope(|s| {
        for worker in 0..4 {
            let mut corpus = corpus.clone();
            s.spawn(move || {
                for page in 0..10 {
                    let url = format!("https://cs.uci.edu/{worker}/{page}");
                    corpus.record(&url, "alpha beta").unwrap();
                }
            });
        }
    });

    let table = FrequencyStore::new(&config.frequencies).load().unwrap();
    assert_eq!(table.get("alpha"), 40);
    assert_eq!(table.get("beta"), 40);

    let log = fs::read_to_string(&config.corpus_log).unwrap();
    assert_eq!(log.lines().count(), 40);
    assert!(log.lines().all(|line| line.ends_with(" -> 2")));
}
