//! Shared test fixtures and helpers.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use hirebox::inbox::seed::seed_messages;
use hirebox::inbox::{Bucket, MessageStore, StoreOptions};
use hirebox::storage::{KvStore, MemoryStore, schema};

/// Create a temporary data directory with the standard hirebox structure.
pub fn temp_data_dir() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let data_dir = tmp.path().to_path_buf();
    std::fs::create_dir_all(data_dir.join("storage")).unwrap();
    (tmp, data_dir)
}

/// Create a minimal .hirebox.toml for testing.
pub fn write_hirebox_toml(dir: &Path, persist_composed: bool, delay_ms: u64) {
    let content = format!(
        r#"[owner]
name = "Test Recruiter"
email = "recruiter@acme.test"

[inbox]
persist_composed = {persist_composed}

[referral]
submit_delay_ms = {delay_ms}
fallback_reward = 500
currency = "USD"
"#,
    );
    std::fs::write(dir.join(".hirebox.toml"), content).unwrap();
}

/// Store over an empty in-memory port with the default seed set.
pub fn fresh_store() -> MessageStore<MemoryStore> {
    MessageStore::open(MemoryStore::new(), seed_messages(), StoreOptions::default())
}

/// Reopen a store over the port of `store`, like a page reload.
pub fn reload<S: KvStore>(store: MessageStore<S>, options: StoreOptions) -> MessageStore<S> {
    MessageStore::open(store.into_port(), seed_messages(), options)
}

pub fn ids<S: KvStore>(store: &MessageStore<S>, bucket: Bucket) -> Vec<String> {
    store.bucket(bucket).iter().map(|m| m.id.clone()).collect()
}

/// Every bucket currently holding `id`.
pub fn locations<S: KvStore>(store: &MessageStore<S>, id: &str) -> Vec<Bucket> {
    Bucket::ALL
        .into_iter()
        .filter(|&b| store.bucket(b).iter().any(|m| m.id == id))
        .collect()
}

/// Assert that no id appears in more than one bucket.
pub fn assert_one_bucket_invariant<S: KvStore>(store: &MessageStore<S>) {
    let mut seen = std::collections::HashSet::new();
    for b in Bucket::ALL {
        for m in store.bucket(b) {
            assert!(seen.insert(m.id.clone()), "id {} is in more than one bucket", m.id);
        }
    }
}

/// Decode a persisted id list straight from a port.
pub fn persisted_ids<S: KvStore>(port: &S, key: &str) -> Vec<String> {
    schema::load(port, key)
}
