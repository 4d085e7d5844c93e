//! Pure message transitions: bucket moves and reply/forward derivatives.
//!
//! Nothing in here touches storage; [`super::store::MessageStore`] applies
//! these and persists the result.

use chrono::{DateTime, Utc};

use super::types::{Bucket, Category, Message, Priority};
use crate::util::{display_time, preview};

/// Sender recorded on messages composed in this desk.
pub const SELF_SENDER: &str = "You";

const PREVIEW_LEN: usize = 90;

/// Prepare a message for the `archived` bucket.
pub fn archived(mut msg: Message) -> Message {
    msg.read = true;
    msg.origin = None;
    msg
}

/// Prepare an archived message for its return to `inbox`. Read stays true.
pub fn unarchived(mut msg: Message) -> Message {
    msg.read = true;
    msg.origin = None;
    msg
}

/// Tag a message with the bucket it is being deleted from.
pub fn deleted_from(mut msg: Message, origin: Bucket) -> Message {
    msg.origin = Some(origin);
    msg
}

/// Destination of a deleted message and the message as it should land there.
///
/// Untagged messages go back to `inbox`. Messages returning to `inbox` come
/// back unread; `sent`/`archived` destinations are forced read.
pub fn restored(mut msg: Message) -> (Bucket, Message) {
    let dest = match msg.origin.take() {
        Some(b @ (Bucket::Sent | Bucket::Archived)) => b,
        _ => Bucket::Inbox,
    };
    msg.read = dest != Bucket::Inbox;
    (dest, msg)
}

/// Build a time-derived identifier, bumping it until `taken` rejects it.
pub fn synthetic_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut n = now.timestamp_millis();
    loop {
        let id = n.to_string();
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

fn quoted_header(original: &Message) -> String {
    format!(
        "From: {}\nDate: {}\nSubject: {}",
        original.sender,
        display_time(&original.timestamp),
        original.subject
    )
}

fn composed(id: String, subject: String, content: String, category: Category, now: DateTime<Utc>) -> Message {
    Message {
        id,
        sender: SELF_SENDER.to_string(),
        recipient: None,
        subject,
        preview: preview(&content, PREVIEW_LEN),
        content,
        category,
        priority: Priority::Medium,
        read: true,
        timestamp: now,
        action_required: None,
        origin: None,
    }
}

/// Reply to `original`. `body` is placed above the quoted original.
pub fn reply(original: &Message, id: String, body: &str, now: DateTime<Utc>) -> Message {
    let mut content = String::new();
    if !body.trim().is_empty() {
        content.push_str(body.trim_end());
        content.push_str("\n\n");
    }
    content.push_str("--- Original message ---\n");
    content.push_str(&quoted_header(original));
    content.push_str("\n\n");
    content.push_str(&original.content);

    let mut msg = composed(
        id,
        format!("Re: {}", original.subject),
        content,
        original.category,
        now,
    );
    msg.recipient = Some(original.sender.clone());
    msg
}

/// Forward `original`, optionally addressed to `recipient`.
pub fn forward(original: &Message, id: String, recipient: Option<&str>, now: DateTime<Utc>) -> Message {
    let content = format!(
        "---------- Forwarded message ----------\n{}\n\n{}",
        quoted_header(original),
        original.content
    );
    let mut msg = composed(
        id,
        format!("Fwd: {}", original.subject),
        content,
        original.category,
        now,
    );
    msg.recipient = recipient.filter(|r| !r.trim().is_empty()).map(str::to_string);
    msg
}

/// A new outgoing message for the `sent` bucket.
pub fn outgoing(id: String, recipient: &str, subject: &str, body: &str, now: DateTime<Utc>) -> Message {
    let mut msg = composed(
        id,
        subject.to_string(),
        body.to_string(),
        Category::System,
        now,
    );
    msg.recipient = Some(recipient.to_string());
    msg
}
