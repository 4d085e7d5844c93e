//! Sent-folder watcher. Picks up `sentMessages` written by another process.
//!
//! Plays the part of the cross-tab storage signal: when the persisted `sent`
//! snapshot changes on disk, the open store re-reads it. Last writer wins.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;
use tracing::info;

use crate::config::hirebox_config;
use crate::inbox::commands::open_store;
use crate::inbox::{Bucket, MessageStore};
use crate::resolve;
use crate::storage::{FileStore, keys};

/// Did `key` change since the last observed modification time?
///
/// Updates `last_seen` in place.
pub fn poll_change(port: &FileStore, key: &str, last_seen: &mut Option<SystemTime>) -> bool {
    let current = port.modified(key);
    if current != *last_seen {
        *last_seen = current;
        return true;
    }
    false
}

/// One poll cycle. Returns true when the store reloaded its `sent` bucket.
pub fn poll_once(store: &mut MessageStore<FileStore>, last_seen: &mut Option<SystemTime>) -> bool {
    if !poll_change(store.port(), keys::SENT, last_seen) {
        return false;
    }
    store.on_storage_event(keys::SENT)
}

/// hirebox inbox watch [--interval N]
#[tokio::main]
pub async fn run(data_dir: &Path, interval_override: Option<u64>) -> Result<()> {
    let config = hirebox_config::load_or_default(Some(&resolve::hirebox_toml_in(data_dir)))?;
    let interval = interval_override.unwrap_or(config.watch.poll_interval).max(1);

    let mut store = open_store(data_dir)?;
    let mut last_seen = store.port().modified(keys::SENT);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    // Handle Ctrl-C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        println!("\nReceived signal, shutting down...");
        shutdown_clone.store(true, Ordering::Relaxed);
    });

    println!(
        "hirebox watch: {} sent message(s), polling every {}s (Ctrl-C to stop)",
        store.bucket(Bucket::Sent).len(),
        interval
    );

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        if poll_once(&mut store, &mut last_seen) {
            let count = store.bucket(Bucket::Sent).len();
            info!(count, "sent folder changed");
            println!("Sent folder changed: {} message(s)", count);
        }

        tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
    }

    println!("hirebox watch: stopped");
    Ok(())
}
