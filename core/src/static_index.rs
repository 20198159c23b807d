//! Static index — O(1) lookup for fully literal paths.
//!
//! Paths with no dynamic segments never touch the tree: they are keyed here
//! by their exact registration string and resolved with a single hash lookup
//! on every match. No parameters are ever attached to a static entry.

use std::collections::HashMap;
use std::sync::Arc;

use crate::store::Store;
use crate::RouterError;

#[derive(Debug, Default)]
pub(crate) struct StaticIndex {
    entries: HashMap<String, Arc<Store>>,
}

impl StaticIndex {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Whether `path` already has an entry.
    pub(crate) fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert an entry for `path`.
    ///
    /// # Errors
    ///
    /// [`RouterError::AlreadyRegistered`] if `path` is already present.
    pub(crate) fn put(&mut self, path: &str, store: Arc<Store>) -> Result<(), RouterError> {
        if self.contains(path) {
            return Err(RouterError::AlreadyRegistered {
                path: path.to_string(),
            });
        }
        self.entries.insert(path.to_string(), store);
        Ok(())
    }

    /// Remove the entry for `path`, reporting whether one existed.
    pub(crate) fn remove(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Exact lookup by the raw path string.
    pub(crate) fn get(&self, path: &str) -> Option<&Arc<Store>> {
        self.entries.get(path)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Arc<Store>)> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_remove() {
        let mut index = StaticIndex::new();
        let store = Arc::new(Store::new());
        index.put("/users", store.clone()).unwrap();

        assert!(index.contains("/users"));
        assert!(Arc::ptr_eq(index.get("/users").unwrap(), &store));
        assert!(index.get("/other").is_none());

        assert!(index.remove("/users"));
        assert!(!index.remove("/users"));
        assert!(index.get("/users").is_none());
    }

    #[test]
    fn test_duplicate_put_rejected() {
        let mut index = StaticIndex::new();
        index.put("/users", Arc::new(Store::new())).unwrap();
        let err = index.put("/users", Arc::new(Store::new())).unwrap_err();
        assert_eq!(
            err,
            RouterError::AlreadyRegistered {
                path: "/users".to_string()
            }
        );
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_keys_are_raw_strings() {
        let mut index = StaticIndex::new();
        index.put("/users", Arc::new(Store::new())).unwrap();
        // No normalization: a trailing slash is a different key.
        assert!(index.get("/users/").is_none());
        assert!(index.get("users").is_none());
    }
}
