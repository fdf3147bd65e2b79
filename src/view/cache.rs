//! Render cache: TTL-gated memoization of rendered output.
//!
//! Freshness is always derived from the backing store's write timestamp,
//! never from in-process state, so independent rendering processes agree
//! on staleness without coordination. The cache is a performance
//! optimization, not a correctness dependency: a failed store write never
//! suppresses already-rendered content.

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, warn};

use super::engine::Scope;
use crate::error::Result;
use crate::storage::Storage;

/// TTL-gated cache over a backing [`Storage`].
#[derive(Debug)]
pub struct RenderCache<S> {
    store: S,
}

/// Deterministic cache key for a resolved path and variable scope.
///
/// Variables are folded into the key so the same template rendered with
/// different scopes never collides; the `BTreeMap` scope gives a canonical
/// serialization.
pub fn cache_key(path: &Path, vars: &Scope) -> Result<String> {
    let vars_json = serde_json::to_vec(vars)
        .map_err(|err| anyhow::anyhow!("failed to serialize variable scope: {err}"))?;

    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(b"\n");
    hasher.update(&vars_json);

    let hash = hasher.finalize();
    Ok(hex::encode(&hash[..16]))
}

impl<S: Storage> RenderCache<S> {
    /// Create a cache over a backing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serve a fresh cached render or execute `render` and store the result.
    ///
    /// Without a TTL the store is never touched. A hit younger than the TTL
    /// is returned unchanged, leaving the stored artifact's write timestamp
    /// intact; anything else re-renders and overwrites the entry.
    pub fn fetch_or_render<F>(
        &self,
        path: &Path,
        vars: &Scope,
        ttl: Option<Duration>,
        render: F,
    ) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        let Some(ttl) = ttl else {
            return render();
        };

        let key = cache_key(path, vars)?;

        if let Some(entry) = self.store.get(&key)? {
            let age = Utc::now().signed_duration_since(entry.written_at);
            if age < ttl {
                debug!(%key, age_secs = age.num_seconds(), "render cache hit");
                return Ok(entry.value);
            }
            debug!(%key, age_secs = age.num_seconds(), "render cache entry expired");
        }

        let content = render()?;

        if let Err(err) = self.store.set(&key, &content) {
            warn!(%key, error = %err, "render cache write failed, returning content");
        }

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::VerandaError;
    use serde_json::json;
    use std::cell::Cell;
    use std::path::PathBuf;

    fn scope(pairs: &[(&str, serde_json::Value)]) -> Scope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn no_ttl_never_touches_store() {
        let cache = RenderCache::new(MemoryStorage::new());
        let out = cache
            .fetch_or_render(Path::new("/views/a.tpl"), &Scope::new(), None, || {
                Ok("rendered".to_string())
            })
            .unwrap();

        assert_eq!(out, "rendered");
        assert!(cache.store().is_empty());
    }

    #[test]
    fn miss_renders_and_stores() {
        let cache = RenderCache::new(MemoryStorage::new());
        let out = cache
            .fetch_or_render(
                Path::new("/views/a.tpl"),
                &Scope::new(),
                Some(Duration::minutes(5)),
                || Ok("rendered".to_string()),
            )
            .unwrap();

        assert_eq!(out, "rendered");
        assert_eq!(cache.store().len(), 1);
    }

    #[test]
    fn fresh_hit_skips_render_and_keeps_timestamp() {
        let cache = RenderCache::new(MemoryStorage::new());
        let path = PathBuf::from("/views/a.tpl");
        let ttl = Some(Duration::minutes(5));
        let key = cache_key(&path, &Scope::new()).unwrap();

        cache
            .fetch_or_render(&path, &Scope::new(), ttl, || Ok("first".to_string()))
            .unwrap();
        let written = cache.store().get(&key).unwrap().unwrap().written_at;

        let rendered_again = Cell::new(false);
        let out = cache
            .fetch_or_render(&path, &Scope::new(), ttl, || {
                rendered_again.set(true);
                Ok("second".to_string())
            })
            .unwrap();

        assert_eq!(out, "first");
        assert!(!rendered_again.get());
        assert_eq!(
            cache.store().get(&key).unwrap().unwrap().written_at,
            written
        );
    }

    #[test]
    fn expired_entry_re_renders_and_overwrites() {
        let storage = MemoryStorage::new();
        let path = PathBuf::from("/views/a.tpl");
        let key = cache_key(&path, &Scope::new()).unwrap();

        storage.set(&key, "stale").unwrap();

        // a zero TTL treats any entry as expired
        let cache = RenderCache::new(storage);
        let out = cache
            .fetch_or_render(&path, &Scope::new(), Some(Duration::seconds(0)), || {
                Ok("fresh".to_string())
            })
            .unwrap();

        assert_eq!(out, "fresh");
        assert_eq!(cache.store().get(&key).unwrap().unwrap().value, "fresh");
    }

    #[test]
    fn different_variables_use_different_keys() {
        let path = PathBuf::from("/views/a.tpl");
        let a = cache_key(&path, &scope(&[("name", json!("one"))])).unwrap();
        let b = cache_key(&path, &scope(&[("name", json!("two"))])).unwrap();
        let c = cache_key(&path, &scope(&[("name", json!("one"))])).unwrap();

        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn different_paths_use_different_keys() {
        let a = cache_key(Path::new("/views/a.tpl"), &Scope::new()).unwrap();
        let b = cache_key(Path::new("/views/b.tpl"), &Scope::new()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn render_failure_propagates_and_stores_nothing() {
        let cache = RenderCache::new(MemoryStorage::new());
        let result = cache.fetch_or_render(
            Path::new("/views/a.tpl"),
            &Scope::new(),
            Some(Duration::minutes(5)),
            || {
                Err(VerandaError::RenderError {
                    path: PathBuf::from("/views/a.tpl"),
                    message: "boom".into(),
                })
            },
        );

        assert!(result.is_err());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn flush_forces_re_render() {
        let cache = RenderCache::new(MemoryStorage::new());
        let path = PathBuf::from("/views/a.tpl");
        let ttl = Some(Duration::minutes(5));

        cache
            .fetch_or_render(&path, &Scope::new(), ttl, || Ok("first".to_string()))
            .unwrap();
        cache.store().flush().unwrap();

        let key = cache_key(&path, &Scope::new()).unwrap();
        assert!(cache.store().get(&key).unwrap().is_none());

        let out = cache
            .fetch_or_render(&path, &Scope::new(), ttl, || Ok("second".to_string()))
            .unwrap();
        assert_eq!(out, "second");
    }
}
