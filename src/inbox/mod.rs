//! Recruiting inbox: message buckets, lifecycle transitions, filter view.

pub mod commands;
pub mod lifecycle;
pub mod seed;
pub mod store;
pub mod types;
pub mod view;

pub use store::{MessageStore, StoreOptions};
pub use types::{Bucket, Category, Message, MessageFilter, Priority};
pub use view::{FilterCounts, InboxView};
