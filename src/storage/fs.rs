//! File-system backed storage.
//!
//! Each entry is a content blob at `<root>/<key>.cache` with a JSON
//! metadata sidecar at `<root>/<key>.meta.json` carrying the write
//! timestamp. Concurrent writers race last-writer-wins, which is acceptable
//! for the render cache (equivalent renders produce equivalent content).

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Storage, StoredEntry};
use crate::error::Result;

/// Disk-backed key/value storage.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

/// Metadata sidecar for a stored entry.
#[derive(Debug, Serialize, Deserialize)]
struct EntryMeta {
    written_at: DateTime<Utc>,
    size_bytes: u64,
}

impl FileSystemStorage {
    /// Create storage rooted at a directory. The directory is created
    /// lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the content blob for a key.
    pub fn content_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.cache"))
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.meta.json"))
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create storage directory {:?}", self.root))?;
        Ok(())
    }
}

impl Storage for FileSystemStorage {
    fn has(&self, key: &str) -> bool {
        self.content_path(key).is_file() && self.meta_path(key).is_file()
    }

    fn get(&self, key: &str) -> Result<Option<StoredEntry>> {
        let meta_path = self.meta_path(key);
        let content_path = self.content_path(key);

        if !meta_path.exists() || !content_path.exists() {
            return Ok(None);
        }

        let meta: EntryMeta = serde_json::from_str(&fs::read_to_string(&meta_path)?)
            .with_context(|| format!("Failed to parse entry metadata {meta_path:?}"))?;
        let value = fs::read_to_string(&content_path)
            .with_context(|| format!("Failed to read stored content {content_path:?}"))?;

        Ok(Some(StoredEntry {
            value,
            written_at: meta.written_at,
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;

        fs::write(self.content_path(key), value)?;

        let meta = EntryMeta {
            written_at: Utc::now(),
            size_bytes: value.len() as u64,
        };
        let json = serde_json::to_string_pretty(&meta)
            .context("Failed to serialize entry metadata")?;
        fs::write(self.meta_path(key), json)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let content_path = self.content_path(key);
        let meta_path = self.meta_path(key);

        let mut removed = false;

        if content_path.exists() {
            fs::remove_file(&content_path)?;
            removed = true;
        }

        if meta_path.exists() {
            fs::remove_file(&meta_path)?;
            removed = true;
        }

        Ok(removed)
    }

    fn flush(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut removed = 0;

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

            if name.ends_with(".cache") {
                fs::remove_file(&path)?;
                removed += 1;
            } else if name.ends_with(".meta.json") {
                fs::remove_file(&path)?;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn set_then_get_round_trips() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        storage.set("abc123", "rendered output").unwrap();

        let entry = storage.get("abc123").unwrap().unwrap();
        assert_eq!(entry.value, "rendered output");
        assert!(entry.written_at <= Utc::now());
    }

    #[test]
    fn has_reflects_presence() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        assert!(!storage.has("abc123"));
        storage.set("abc123", "content").unwrap();
        assert!(storage.has("abc123"));
    }

    #[test]
    fn get_absent_key_returns_none() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        assert!(storage.get("missing").unwrap().is_none());
    }

    #[test]
    fn overwrite_refreshes_timestamp() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        storage.set("abc123", "first").unwrap();
        let first = storage.get("abc123").unwrap().unwrap();

        storage.set("abc123", "second").unwrap();
        let second = storage.get("abc123").unwrap().unwrap();

        assert_eq!(second.value, "second");
        assert!(second.written_at >= first.written_at);
    }

    #[test]
    fn remove_deletes_blob_and_sidecar() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        storage.set("abc123", "content").unwrap();
        assert!(storage.remove("abc123").unwrap());

        assert!(!storage.has("abc123"));
        assert!(!storage.content_path("abc123").exists());
    }

    #[test]
    fn remove_absent_key_returns_false() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        assert!(!storage.remove("missing").unwrap());
    }

    #[test]
    fn flush_removes_everything() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path());

        storage.set("one", "a").unwrap();
        storage.set("two", "b").unwrap();

        assert_eq!(storage.flush().unwrap(), 2);
        assert!(!storage.has("one"));
        assert!(!storage.has("two"));
    }

    #[test]
    fn flush_on_missing_root_is_zero() {
        let temp = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp.path().join("never-created"));

        assert_eq!(storage.flush().unwrap(), 0);
    }

    #[test]
    fn lazy_directory_creation() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("cache");
        let storage = FileSystemStorage::new(&root);

        assert!(!root.exists());
        storage.set("abc", "content").unwrap();
        assert!(root.exists());
    }
}
