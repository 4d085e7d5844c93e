//! CLI handlers for `hirebox inbox ...`.

use anyhow::Result;
use std::path::Path;

use super::seed::seed_messages;
use super::store::MessageStore;
use super::types::{Bucket, Message, MessageFilter};
use super::view::InboxView;
use crate::config::hirebox_config;
use crate::resolve;
use crate::storage::FileStore;
use crate::util::display_time;

/// Open the message store of a data directory.
pub fn open_store(data_dir: &Path) -> Result<MessageStore<FileStore>> {
    let config = hirebox_config::load_or_default(Some(&resolve::hirebox_toml_in(data_dir)))?;
    let port = FileStore::open(&resolve::storage_dir_in(data_dir))?;
    Ok(MessageStore::open(
        port,
        seed_messages(),
        config.inbox.store_options(),
    ))
}

fn print_row(msg: &Message) {
    let marker = if msg.read { " " } else { "*" };
    let origin = msg
        .origin
        .map(|b| format!("  (from {})", b))
        .unwrap_or_default();
    println!(
        "  {} {:<14} {:<20} {}  {}  [{}]{}",
        marker,
        msg.id,
        msg.sender,
        msg.subject,
        display_time(&msg.timestamp),
        msg.category.as_str(),
        origin
    );
}

fn print_message(bucket: Bucket, msg: &Message) {
    println!("# {}", msg.subject);
    println!();
    println!("**From**: {}", msg.sender);
    if let Some(ref to) = msg.recipient {
        println!("**To**: {}", to);
    }
    println!("**Date**: {}", display_time(&msg.timestamp));
    println!("**Folder**: {}", bucket);
    println!("**Category**: {}", msg.category.as_str());
    println!("**Priority**: {}", msg.priority.as_str());
    if let Some(ref action) = msg.action_required {
        println!("**Action required**: {}", action);
    }
    println!();
    println!("---");
    println!();
    println!("{}", msg.content);
}

/// hirebox inbox list [--filter F] [--query Q]
pub fn list(data_dir: &Path, filter: &str, query: &str) -> Result<()> {
    let filter: MessageFilter = filter.parse()?;
    let store = open_store(data_dir)?;
    let view = InboxView::new(filter, query);
    let messages = view.display(&store);

    if messages.is_empty() {
        println!("No messages in '{}'.", filter);
        return Ok(());
    }
    println!("{} ({}):\n", filter, messages.len());
    for msg in messages {
        print_row(msg);
    }
    Ok(())
}

/// hirebox inbox show ID
pub fn show(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let mut view = InboxView::default();
    if !view.select(&mut store, id) {
        println!("No message with id '{}'.", id);
        return Ok(());
    }
    if let Some((bucket, msg)) = view.selected_id().and_then(|sid| store.find(sid)) {
        print_message(bucket, msg);
    }
    Ok(())
}

/// hirebox inbox counts
pub fn counts(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let counts = InboxView::counts(&store);
    for filter in MessageFilter::ALL {
        println!("  {:<9} {}", filter.as_str(), counts.get(filter));
    }
    Ok(())
}

fn report(done: bool, ok: String, noop: String) {
    if done {
        println!("{}", ok);
    } else {
        println!("{}", noop);
    }
}

pub fn mark_read(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    report(
        store.mark_read(id),
        format!("Marked {} as read.", id),
        format!("No inbox message '{}'.", id),
    );
    Ok(())
}

pub fn mark_unread(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    report(
        store.mark_unread(id),
        format!("Marked {} as unread.", id),
        format!("No inbox message '{}'.", id),
    );
    Ok(())
}

pub fn archive(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    report(
        store.archive(id),
        format!("Archived {}.", id),
        format!("No inbox message '{}'.", id),
    );
    Ok(())
}

pub fn unarchive(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    report(
        store.unarchive(id),
        format!("Moved {} back to the inbox.", id),
        format!("No archived message '{}'.", id),
    );
    Ok(())
}

/// hirebox inbox delete ID [--from FILTER]
pub fn delete(data_dir: &Path, id: &str, from: &str) -> Result<()> {
    let filter: MessageFilter = from.parse()?;
    let mut store = open_store(data_dir)?;
    let mut view = InboxView::new(filter, "");
    let bucket = filter.bucket();
    report(
        view.delete(&mut store, id),
        format!("Deleted {} from {}.", id, bucket),
        format!("No message '{}' in {}.", id, bucket),
    );
    Ok(())
}

pub fn restore(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let restored = store.restore(id);
    let dest = store.find(id).map(|(b, _)| b.to_string()).unwrap_or_default();
    report(
        restored,
        format!("Restored {} to {}.", id, dest),
        format!("No deleted message '{}'.", id),
    );
    Ok(())
}

pub fn purge(data_dir: &Path, id: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    report(
        store.permanent_delete(id),
        format!("Permanently deleted {}.", id),
        format!("No deleted message '{}'.", id),
    );
    Ok(())
}

/// hirebox inbox reply ID [--body TEXT]
pub fn reply(data_dir: &Path, id: &str, body: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let mut view = InboxView::default();
    match view.reply(&mut store, id, body) {
        Some(new_id) => {
            println!("Reply {} added to the inbox.", new_id);
            if let Some(msg) = view.selected(&store) {
                println!();
                print_message(Bucket::Inbox, msg);
            }
        }
        None => println!("No message with id '{}'.", id),
    }
    Ok(())
}

/// hirebox inbox forward ID [--to ADDR]
pub fn forward(data_dir: &Path, id: &str, to: Option<&str>) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let mut view = InboxView::default();
    match view.forward(&mut store, id, to) {
        Some(new_id) => println!("Forward {} added to the inbox.", new_id),
        None => println!("No message with id '{}'.", id),
    }
    Ok(())
}

/// hirebox inbox send --to ADDR --subject S --body B
pub fn send(data_dir: &Path, to: &str, subject: &str, body: &str) -> Result<()> {
    let mut store = open_store(data_dir)?;
    let id = store.send(to, subject, body);
    println!("Sent {} to {}.", id, to);
    Ok(())
}
