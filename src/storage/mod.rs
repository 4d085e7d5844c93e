//! Persistence port: synchronous get/set/remove over string keys.
//!
//! The message store owns everything written through this port. Values are
//! JSON text; see [`schema`] for the envelope every key uses.

pub mod file;
pub mod keys;
pub mod memory;
pub mod schema;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

pub trait KvStore {
    /// Read the raw value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
