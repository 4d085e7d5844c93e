//! Message store: owns the four buckets and mirrors every mutation to the
//! persistence port.
//!
//! Invariant: a message id lives in at most one bucket. Operations on an id
//! that is not where the operation expects it are silent no-ops returning
//! `false`.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, warn};

use super::lifecycle;
use super::types::{Bucket, Message};
use crate::storage::{KvStore, keys, schema};

#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Also persist replies/forwards sitting in the inbox.
    pub persist_composed: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            persist_composed: true,
        }
    }
}

pub struct MessageStore<S: KvStore> {
    port: S,
    options: StoreOptions,
    seed_ids: HashSet<String>,
    inbox: Vec<Message>,
    sent: Vec<Message>,
    archived: Vec<Message>,
    deleted: Vec<Message>,
    deleted_ids: Vec<String>,
    read_ids: Vec<String>,
}

/// Write `items` under `key`, logging instead of failing.
fn persist<S: KvStore, T: Serialize>(port: &mut S, key: &str, items: &[T]) {
    if let Err(e) = schema::save(port, key, items) {
        error!(key, error = %e, "failed to persist");
    }
}

fn load_messages<S: KvStore>(port: &S, key: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = schema::load(port, key);
    messages.retain(|m| !m.id.is_empty());
    messages
}

/// Drop messages whose id is already claimed, then claim the rest.
/// Returns true when something was dropped.
fn keep_unclaimed(key: &str, messages: &mut Vec<Message>, claimed: &mut HashSet<String>) -> bool {
    let before = messages.len();
    messages.retain(|m| claimed.insert(m.id.clone()));
    let dropped = before - messages.len();
    if dropped > 0 {
        warn!(key, dropped, "dropping messages already held by another bucket");
    }
    dropped > 0
}

fn take(bucket: &mut Vec<Message>, id: &str) -> Option<Message> {
    let idx = bucket.iter().position(|m| m.id == id)?;
    Some(bucket.remove(idx))
}

fn add_id(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|i| i == id) {
        ids.push(id.to_string());
    }
}

fn remove_id(ids: &mut Vec<String>, id: &str) {
    ids.retain(|i| i != id);
}

impl<S: KvStore> MessageStore<S> {
    /// Build the store from the seed set and whatever the port holds.
    pub fn open(mut port: S, seed: Vec<Message>, options: StoreOptions) -> Self {
        let deleted_ids: Vec<String> = schema::load(&port, keys::DELETED_IDS);
        // Until the read list is first written, the seed's own flags stand
        let read_ids: Vec<String> = schema::load_opt(&port, keys::READ_IDS).unwrap_or_else(|| {
            seed.iter()
                .filter(|m| m.read)
                .map(|m| m.id.clone())
                .collect()
        });
        let mut sent = load_messages(&port, keys::SENT);
        let mut archived = load_messages(&port, keys::ARCHIVED);
        let mut deleted = load_messages(&port, keys::DELETED);

        let seed_ids: HashSet<String> = seed.iter().map(|m| m.id.clone()).collect();

        // A half-written transfer can leave an id in two snapshots.
        // Precedence: deleted, then archived, then sent.
        let mut claimed: HashSet<String> = HashSet::new();
        if keep_unclaimed(keys::DELETED, &mut deleted, &mut claimed) {
            persist(&mut port, keys::DELETED, &deleted);
        }
        if keep_unclaimed(keys::ARCHIVED, &mut archived, &mut claimed) {
            persist(&mut port, keys::ARCHIVED, &archived);
        }
        if keep_unclaimed(keys::SENT, &mut sent, &mut claimed) {
            persist(&mut port, keys::SENT, &sent);
        }

        // Ids already claimed by a restored bucket stay out of the inbox
        claimed.extend(deleted_ids.iter().cloned());

        let mut inbox = Vec::new();
        if options.persist_composed {
            for msg in load_messages(&port, keys::COMPOSED) {
                if seed_ids.contains(&msg.id) || claimed.contains(&msg.id) {
                    continue;
                }
                claimed.insert(msg.id.clone());
                inbox.push(msg);
            }
        }
        for mut msg in seed {
            if claimed.contains(&msg.id) {
                continue;
            }
            msg.read = read_ids.iter().any(|id| *id == msg.id);
            claimed.insert(msg.id.clone());
            inbox.push(msg);
        }

        debug!(
            inbox = inbox.len(),
            sent = sent.len(),
            archived = archived.len(),
            deleted = deleted.len(),
            "message store opened"
        );

        Self {
            port,
            options,
            seed_ids,
            inbox,
            sent,
            archived,
            deleted,
            deleted_ids,
            read_ids,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Message] {
        match bucket {
            Bucket::Inbox => &self.inbox,
            Bucket::Sent => &self.sent,
            Bucket::Archived => &self.archived,
            Bucket::Deleted => &self.deleted,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Message> {
        match bucket {
            Bucket::Inbox => &mut self.inbox,
            Bucket::Sent => &mut self.sent,
            Bucket::Archived => &mut self.archived,
            Bucket::Deleted => &mut self.deleted,
        }
    }

    /// Locate a message in any bucket.
    pub fn find(&self, id: &str) -> Option<(Bucket, &Message)> {
        Bucket::ALL.iter().find_map(|&b| {
            self.bucket(b)
                .iter()
                .find(|m| m.id == id)
                .map(|m| (b, m))
        })
    }

    fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn deleted_ids(&self) -> &[String] {
        &self.deleted_ids
    }

    pub fn read_ids(&self) -> &[String] {
        &self.read_ids
    }

    pub fn port(&self) -> &S {
        &self.port
    }

    /// Direct access to the port, for writers that bypass this store.
    pub fn port_mut(&mut self) -> &mut S {
        &mut self.port
    }

    pub fn into_port(self) -> S {
        self.port
    }

    // --- Persistence ---

    fn persist_bucket(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Inbox => self.persist_composed(),
            Bucket::Sent => persist(&mut self.port, keys::SENT, &self.sent),
            Bucket::Archived => persist(&mut self.port, keys::ARCHIVED, &self.archived),
            Bucket::Deleted => persist(&mut self.port, keys::DELETED, &self.deleted),
        }
    }

    fn persist_composed(&mut self) {
        if !self.options.persist_composed {
            return;
        }
        let composed: Vec<&Message> = self
            .inbox
            .iter()
            .filter(|m| !self.seed_ids.contains(&m.id))
            .collect();
        persist(&mut self.port, keys::COMPOSED, &composed);
    }

    fn persist_read_ids(&mut self) {
        persist(&mut self.port, keys::READ_IDS, &self.read_ids);
    }

    /// Record a read flag forced by a transition, so it survives reopening.
    fn record_read(&mut self, id: &str, read: bool) {
        if read {
            add_id(&mut self.read_ids, id);
        } else {
            remove_id(&mut self.read_ids, id);
        }
        self.persist_read_ids();
    }

    fn persist_deleted_ids(&mut self) {
        persist(&mut self.port, keys::DELETED_IDS, &self.deleted_ids);
    }

    // --- Read state ---

    fn set_read(&mut self, id: &str, read: bool) -> bool {
        let Some(msg) = self.inbox.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        msg.read = read;
        self.record_read(id, read);
        if !self.seed_ids.contains(id) {
            self.persist_composed();
        }
        debug!(id, read, "read state changed");
        true
    }

    /// Mark an inbox message read. Idempotent.
    pub fn mark_read(&mut self, id: &str) -> bool {
        self.set_read(id, true)
    }

    pub fn mark_unread(&mut self, id: &str) -> bool {
        self.set_read(id, false)
    }

    // --- Bucket transfers ---

    /// Move `inbox` → `archived`, forcing read.
    pub fn archive(&mut self, id: &str) -> bool {
        let Some(msg) = take(&mut self.inbox, id) else {
            return false;
        };
        self.archived.insert(0, lifecycle::archived(msg));
        self.record_read(id, true);
        self.persist_bucket(Bucket::Archived);
        self.persist_bucket(Bucket::Inbox);
        debug!(id, "archived");
        true
    }

    /// Move `archived` → `inbox`.
    pub fn unarchive(&mut self, id: &str) -> bool {
        let Some(msg) = take(&mut self.archived, id) else {
            return false;
        };
        self.inbox.insert(0, lifecycle::unarchived(msg));
        self.record_read(id, true);
        self.persist_bucket(Bucket::Archived);
        self.persist_bucket(Bucket::Inbox);
        debug!(id, "unarchived");
        true
    }

    /// Move a message from `from` (inbox, sent or archived) into `deleted`,
    /// tagging it with its origin.
    pub fn delete(&mut self, id: &str, from: Bucket) -> bool {
        if from == Bucket::Deleted {
            return false;
        }
        let Some(msg) = take(self.bucket_mut(from), id) else {
            return false;
        };
        self.deleted.insert(0, lifecycle::deleted_from(msg, from));
        add_id(&mut self.deleted_ids, id);
        self.persist_deleted_ids();
        self.persist_bucket(Bucket::Deleted);
        self.persist_bucket(from);
        debug!(id, from = %from, "deleted");
        true
    }

    /// Move a message out of `deleted` into its origin bucket.
    pub fn restore(&mut self, id: &str) -> bool {
        let Some(msg) = take(&mut self.deleted, id) else {
            return false;
        };
        let (dest, msg) = lifecycle::restored(msg);
        let read = msg.read;
        self.bucket_mut(dest).insert(0, msg);
        self.record_read(id, read);
        remove_id(&mut self.deleted_ids, id);
        self.persist_deleted_ids();
        self.persist_bucket(Bucket::Deleted);
        self.persist_bucket(dest);
        debug!(id, to = %dest, "restored");
        true
    }

    /// Drop a message from `deleted` for good. Its id stays in the
    /// deleted-id list so the seed set never brings it back.
    pub fn permanent_delete(&mut self, id: &str) -> bool {
        if take(&mut self.deleted, id).is_none() {
            return false;
        }
        add_id(&mut self.deleted_ids, id);
        self.persist_deleted_ids();
        self.persist_bucket(Bucket::Deleted);
        debug!(id, "permanently deleted");
        true
    }

    // --- Composition ---

    fn next_id(&self) -> String {
        lifecycle::synthetic_id(Utc::now(), |candidate| {
            self.contains(candidate) || self.deleted_ids.iter().any(|d| d == candidate)
        })
    }

    fn prepend_composed(&mut self, msg: Message) -> String {
        let id = msg.id.clone();
        self.inbox.insert(0, msg);
        self.persist_composed();
        id
    }

    /// Reply to any message in the store. Returns the new message id.
    pub fn reply(&mut self, id: &str, body: &str) -> Option<String> {
        let (_, original) = self.find(id)?;
        let msg = lifecycle::reply(original, self.next_id(), body, Utc::now());
        debug!(id, new_id = %msg.id, "reply composed");
        Some(self.prepend_composed(msg))
    }

    /// Forward any message in the store. Returns the new message id.
    pub fn forward(&mut self, id: &str, recipient: Option<&str>) -> Option<String> {
        let (_, original) = self.find(id)?;
        let msg = lifecycle::forward(original, self.next_id(), recipient, Utc::now());
        debug!(id, new_id = %msg.id, "forward composed");
        Some(self.prepend_composed(msg))
    }

    /// Compose a new outgoing message straight into `sent`.
    pub fn send(&mut self, recipient: &str, subject: &str, body: &str) -> String {
        let msg = lifecycle::outgoing(self.next_id(), recipient, subject, body, Utc::now());
        let id = msg.id.clone();
        self.sent.insert(0, msg);
        self.persist_bucket(Bucket::Sent);
        debug!(id = %id, "message sent");
        id
    }

    // --- External change signal ---

    /// Re-read the `sent` bucket from the port (last writer wins).
    pub fn refresh_sent(&mut self) {
        let mut sent = load_messages(&self.port, keys::SENT);
        // Keep the one-bucket invariant against a stale or foreign snapshot
        sent.retain(|m| {
            !self.inbox.iter().any(|o| o.id == m.id)
                && !self.archived.iter().any(|o| o.id == m.id)
                && !self.deleted.iter().any(|o| o.id == m.id)
        });
        debug!(count = sent.len(), "sent bucket refreshed");
        self.sent = sent;
    }

    /// React to a change of `key` made by another writer. Returns true when
    /// the store reloaded something.
    pub fn on_storage_event(&mut self, key: &str) -> bool {
        if key != keys::SENT {
            return false;
        }
        self.refresh_sent();
        true
    }
}
