//! In-memory storage.
//!
//! A stand-in for the file-system store in tests and a substitution proof
//! for the [`Storage`] contract.

use chrono::Utc;
use std::cell::RefCell;
use std::collections::HashMap;

use super::{Storage, StoredEntry};
use crate::error::Result;

/// HashMap-backed key/value storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, StoredEntry>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn has(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn get(&self, key: &str) -> Result<Option<StoredEntry>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                written_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }

    fn flush(&self) -> Result<usize> {
        let mut entries = self.entries.borrow_mut();
        let count = entries.len();
        entries.clear();
        Ok(count)
    }
}
