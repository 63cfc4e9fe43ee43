//! Key-addressed persistence of a component's serialized form
//!
//! Cached state is always re-derivable from whatever produced the
//! component in the first place, so persistence is strictly best-effort:
//! `load` is total (missing or corrupt files yield a default component)
//! and `save` logs failures instead of propagating them. The cache is the
//! sole writer of its file; callers invalidate by picking a new key or
//! deleting the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::component::Component;

/// Persists one component under an opaque string key.
#[derive(Debug, Clone)]
pub struct StateCache {
    key: String,
    path: PathBuf,
}

impl StateCache {
    /// Create a cache under the platform cache directory.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_root(key, default_root())
    }

    /// Create a cache under an explicit root; used by tests and by hosts
    /// that manage their own cache location.
    pub fn with_root(key: impl Into<String>, root: impl AsRef<Path>) -> Self {
        let key = key.into();
        let path = root.as_ref().join(file_name(&key));
        Self { key, path }
    }

    /// The cache key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The derived file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a cache file exists for this key.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the cached component. Never fails: a missing or corrupt file
    /// yields an empty default component. Item indices are renumbered
    /// after decoding since the file may carry stale positions.
    pub fn load(&self) -> Component {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Component::default(),
        };
        match serde_json::from_slice::<Component>(&bytes) {
            Ok(mut component) => {
                component.renumber(0);
                component
            }
            Err(err) => {
                debug!(key = %self.key, %err, "corrupt cache file, returning default");
                Component::default()
            }
        }
    }

    /// Serialize and overwrite the cache file. Failures are logged, not
    /// propagated.
    pub fn save(&self, component: &Component) {
        if let Err(err) = self.write(component) {
            warn!(key = %self.key, %err, "failed to save component cache");
        }
    }

    /// Delete the cache file if present.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }

    fn write(&self, component: &Component) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(component)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(&self.path, json)
    }
}

/// Platform cache root, falling back to the temp dir when the platform
/// offers none.
fn default_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("spots")
}

/// Deterministic file name for a key: printable-safe characters survive,
/// the rest become dashes.
fn file_name(key: &str) -> String {
    let safe: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{safe}.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Item;
    use crate::testing::temp_cache_root;

    #[test]
    fn test_load_on_missing_key_is_default() {
        let cache = StateCache::with_root("never-saved", temp_cache_root());
        let component = cache.load();
        assert!(component.kind.is_empty());
        assert!(component.title.is_empty());
        assert!(component.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let root = temp_cache_root();
        let cache = StateCache::with_root("playlist", &root);

        let mut component = Component::new("grid").with_title("Albums");
        component.meta.set("layout", "grid");
        component.append(Item::new("one"));
        component.append(Item::new("two"));
        cache.save(&component);

        let loaded = StateCache::with_root("playlist", &root).load();
        assert_eq!(loaded.kind, component.kind);
        assert_eq!(loaded.title, component.title);
        assert_eq!(loaded.len(), component.len());
        assert_eq!(loaded.meta, component.meta);
        assert_eq!(loaded.items[1].index, 1);
    }

    #[test]
    fn test_corrupt_file_swallowed() {
        let root = temp_cache_root();
        let cache = StateCache::with_root("broken", &root);
        fs::create_dir_all(&root).unwrap();
        fs::write(cache.path(), b"{ not json").unwrap();

        let component = cache.load();
        assert!(component.is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let root = temp_cache_root();
        let cache = StateCache::with_root("key", &root);

        cache.save(&Component::new("list"));
        cache.save(&Component::new("grid"));

        assert_eq!(cache.load().kind, "grid");
    }

    #[test]
    fn test_key_sanitization() {
        let cache = StateCache::with_root("feed/home feed", "/tmp/x");
        let name = cache.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, "feed-home-feed.json");
    }
}
