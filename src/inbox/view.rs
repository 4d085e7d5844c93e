//! Filter/search derivation and the current selection.

use super::store::MessageStore;
use super::types::{Bucket, Message, MessageFilter};
use crate::storage::KvStore;
use crate::util::contains_ignore_case;

/// Badge counts for every filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub unread: usize,
    pub read: usize,
    pub sent: usize,
    pub archived: usize,
    pub deleted: usize,
}

impl FilterCounts {
    pub fn get(&self, filter: MessageFilter) -> usize {
        match filter {
            MessageFilter::All => self.all,
            MessageFilter::Unread => self.unread,
            MessageFilter::Read => self.read,
            MessageFilter::Sent => self.sent,
            MessageFilter::Archived => self.archived,
            MessageFilter::Deleted => self.deleted,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InboxView {
    pub filter: MessageFilter,
    pub query: String,
    selected: Option<String>,
}

/// Does `msg` pass the read-state refinement and free-text query of `filter`?
///
/// Only meaningful for the inbox-backed filters; `sent`, `archived` and
/// `deleted` are plain views and accept everything.
pub fn matches(filter: MessageFilter, query: &str, msg: &Message) -> bool {
    let read_ok = match filter {
        MessageFilter::Unread => !msg.read,
        MessageFilter::Read => msg.read,
        MessageFilter::All => true,
        MessageFilter::Sent | MessageFilter::Archived | MessageFilter::Deleted => return true,
    };
    read_ok && (contains_ignore_case(&msg.subject, query) || contains_ignore_case(&msg.sender, query))
}

impl InboxView {
    pub fn new(filter: MessageFilter, query: &str) -> Self {
        Self {
            filter,
            query: query.to_string(),
            selected: None,
        }
    }

    /// Messages shown for the current filter and query, in bucket order.
    pub fn display<'a, S: KvStore>(&self, store: &'a MessageStore<S>) -> Vec<&'a Message> {
        store
            .bucket(self.filter.bucket())
            .iter()
            .filter(|m| matches(self.filter, &self.query, m))
            .collect()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected<'a, S: KvStore>(&self, store: &'a MessageStore<S>) -> Option<&'a Message> {
        let id = self.selected.as_deref()?;
        store.find(id).map(|(_, m)| m)
    }

    /// Make `id` the active message. An unread inbox message is marked read first.
    pub fn select<S: KvStore>(&mut self, store: &mut MessageStore<S>, id: &str) -> bool {
        let Some((bucket, msg)) = store.find(id) else {
            return false;
        };
        if bucket == Bucket::Inbox && !msg.read {
            store.mark_read(id);
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Delete `id` from the bucket behind the current filter.
    pub fn delete<S: KvStore>(&mut self, store: &mut MessageStore<S>, id: &str) -> bool {
        let done = store.delete(id, self.filter.bucket());
        if done && self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        done
    }

    /// Archive `id`, dropping the selection when it pointed at it.
    pub fn archive<S: KvStore>(&mut self, store: &mut MessageStore<S>, id: &str) -> bool {
        let done = store.archive(id);
        if done && self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        done
    }

    /// Reply to `id` and select the new message.
    pub fn reply<S: KvStore>(&mut self, store: &mut MessageStore<S>, id: &str, body: &str) -> Option<String> {
        let new_id = store.reply(id, body)?;
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    /// Forward `id` and select the new message.
    pub fn forward<S: KvStore>(
        &mut self,
        store: &mut MessageStore<S>,
        id: &str,
        recipient: Option<&str>,
    ) -> Option<String> {
        let new_id = store.forward(id, recipient)?;
        self.selected = Some(new_id.clone());
        Some(new_id)
    }

    pub fn counts<S: KvStore>(store: &MessageStore<S>) -> FilterCounts {
        let inbox = store.bucket(Bucket::Inbox);
        let unread = inbox.iter().filter(|m| !m.read).count();
        FilterCounts {
            all: inbox.len(),
            unread,
            read: inbox.len() - unread,
            sent: store.bucket(Bucket::Sent).len(),
            archived: store.bucket(Bucket::Archived).len(),
            deleted: store.bucket(Bucket::Deleted).len(),
        }
    }
}
