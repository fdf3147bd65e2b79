//! Backing key/value store contract for the render cache.
//!
//! The render cache treats its store as opaque: any implementation of
//! [`Storage`] (file-system, in-memory, distributed) is substitutable.
//! Freshness decisions belong to the cache, which derives them from the
//! entry's write timestamp; the store only records what was written and
//! when.

pub mod fs;
pub mod memory;

pub use fs::FileSystemStorage;
pub use memory::MemoryStorage;

use chrono::{DateTime, Utc};

use crate::error::Result;

/// A stored value together with its write timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// The stored content.
    pub value: String,
    /// When the entry was last written.
    pub written_at: DateTime<Utc>,
}

/// Key/value storage contract consumed by the render cache.
pub trait Storage {
    /// Whether an entry exists under the key.
    fn has(&self, key: &str) -> bool;

    /// Fetch the entry under the key, if present.
    fn get(&self, key: &str) -> Result<Option<StoredEntry>>;

    /// Write (or overwrite) the entry under the key, stamping it with the
    /// current time.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the entry under the key. Returns whether anything was removed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Remove every entry unconditionally. Returns the number removed.
    fn flush(&self) -> Result<usize>;
}
