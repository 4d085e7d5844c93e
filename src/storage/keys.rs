//! Keys of the persisted mirror.

pub const DELETED_IDS: &str = "deletedMessageIds";
pub const READ_IDS: &str = "readMessageIds";
pub const ARCHIVED: &str = "archivedMessages";
pub const DELETED: &str = "deletedMessages";
pub const SENT: &str = "sentMessages";
/// Replies and forwards living in the inbox (only written when `persist_composed` is on).
pub const COMPOSED: &str = "composedMessages";
