//! Repository Layer - Key-Value Trait
//!
//! Browser local storage in production, an in-memory map in tests or when
//! storage is disabled.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::error::StorageError;

/// Synchronous string key-value persistence
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory store, optionally rejecting writes to simulate a full quota
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: RefCell<HashMap<String, String>>,
    reject_writes: Cell<bool>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.get() {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
