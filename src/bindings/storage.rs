//! Local Storage Key-Value Store
//!
//! Falls back to an in-memory map when the page has no storage (private
//! mode, disabled cookies). Data then lasts for the session only.

use plant_core::repository::{KvStore, MemoryKvStore};
use plant_core::StorageError;

pub enum BrowserStorage {
    Local(web_sys::Storage),
    Memory(MemoryKvStore),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => BrowserStorage::Local(storage),
            _ => {
                log::warn!("local storage unavailable, records will not survive a reload");
                BrowserStorage::Memory(MemoryKvStore::new())
            }
        }
    }
}

impl KvStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            BrowserStorage::Local(storage) => storage.get_item(key).map_err(|e| StorageError::Read {
                key: key.to_string(),
                reason: format!("{:?}", e),
            }),
            BrowserStorage::Memory(memory) => memory.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            BrowserStorage::Local(storage) => storage.set_item(key, value).map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            }),
            BrowserStorage::Memory(memory) => memory.set(key, value),
        }
    }
}
