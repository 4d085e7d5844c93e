//! Inbox data types: Message, Bucket, MessageFilter.

use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Application,
    Interview,
    Task,
    System,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Application => "application",
            Category::Interview => "interview",
            Category::Task => "task",
            Category::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Mutually exclusive partition a message lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Inbox,
    Sent,
    Archived,
    Deleted,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Bucket::Inbox, Bucket::Sent, Bucket::Archived, Bucket::Deleted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Inbox => "inbox",
            Bucket::Sent => "sent",
            Bucket::Archived => "archived",
            Bucket::Deleted => "deleted",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "inbox" => Ok(Bucket::Inbox),
            "sent" => Ok(Bucket::Sent),
            "archived" => Ok(Bucket::Archived),
            "deleted" => Ok(Bucket::Deleted),
            other => bail!("Unknown bucket '{}'. Expected inbox, sent, archived or deleted", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub content: String,
    pub category: Category,
    pub priority: Priority,
    #[serde(default)]
    pub read: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<String>,
    /// Bucket the message was deleted from. Only set while it sits in `deleted`.
    #[serde(
        default,
        rename = "originalSection",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<Bucket>,
}

/// View selector of the inbox screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageFilter {
    #[default]
    All,
    Unread,
    Read,
    Sent,
    Archived,
    Deleted,
}

impl MessageFilter {
    pub const ALL: [MessageFilter; 6] = [
        MessageFilter::All,
        MessageFilter::Unread,
        MessageFilter::Read,
        MessageFilter::Sent,
        MessageFilter::Archived,
        MessageFilter::Deleted,
    ];

    /// Bucket backing this view.
    pub fn bucket(&self) -> Bucket {
        match self {
            MessageFilter::All | MessageFilter::Unread | MessageFilter::Read => Bucket::Inbox,
            MessageFilter::Sent => Bucket::Sent,
            MessageFilter::Archived => Bucket::Archived,
            MessageFilter::Deleted => Bucket::Deleted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageFilter::All => "all",
            MessageFilter::Unread => "unread",
            MessageFilter::Read => "read",
            MessageFilter::Sent => "sent",
            MessageFilter::Archived => "archived",
            MessageFilter::Deleted => "deleted",
        }
    }
}

impl fmt::Display for MessageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        MessageFilter::ALL
            .iter()
            .find(|f| f.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown filter '{}'. Expected one of: all, unread, read, sent, archived, deleted",
                    s
                )
            })
    }
}
