//! `Store` — the attribute bag attached to every registered route.
//!
//! A store is a string-keyed bag of [`Value`]s with an optional *base layer*.
//! Reads check the store's own fields first and then fall through the base
//! chain; writes always land in the own layer. Several routes can therefore
//! share one base store (optional-segment expansion registers every generated
//! combination against a single shared store) while per-route writes stay
//! private to the layer that received them.
//!
//! # Interior mutability
//!
//! `register` hands the caller an `Arc<Store>` so route data can be attached
//! after registration. Field access goes through an internal `RwLock`; a
//! poisoned lock is absorbed rather than propagated, so a panicking writer
//! never makes a store unreadable.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use waymark::Store;
//!
//! let base = Arc::new(Store::new());
//! base.set("handler", "list_users");
//!
//! let layer = Store::layered(base.clone());
//! assert_eq!(layer.get("handler"), Some("list_users".into()));
//!
//! // Writes shadow the base without mutating it.
//! layer.set("handler", "get_user");
//! assert_eq!(layer.get("handler"), Some("get_user".into()));
//! assert_eq!(base.get("handler"), Some("list_users".into()));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Attribute value type stored in a [`Store`].
pub type Value = serde_json::Value;

/// A string-keyed attribute bag with optional base-layer delegation.
#[derive(Default)]
pub struct Store {
    /// Base layer consulted when a key is absent from `fields`.
    base: Option<Arc<Store>>,
    fields: RwLock<HashMap<String, Value>>,
}

impl Store {
    /// Create an empty store with no base layer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: None,
            fields: RwLock::new(HashMap::new()),
        }
    }

    /// Create an empty store that reads through to `base` for missing keys.
    #[must_use]
    pub fn layered(base: Arc<Store>) -> Self {
        Self {
            base: Some(base),
            fields: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the base layer, if any.
    #[must_use]
    pub fn base(&self) -> Option<&Arc<Store>> {
        self.base.as_ref()
    }

    /// Look up a field, falling through the base chain.
    ///
    /// The value is cloned out so no lock is held across the call boundary.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.read_fields().get(key) {
            return Some(value.clone());
        }
        self.base.as_ref().and_then(|base| base.get(key))
    }

    /// Returns `true` if `key` resolves anywhere in the layer chain.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.read_fields().contains_key(key)
            || self.base.as_ref().is_some_and(|base| base.contains(key))
    }

    /// Set a field in this store's own layer.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.write_fields().insert(key.into(), value.into());
    }

    /// Remove a field from this store's own layer.
    ///
    /// The base chain is untouched; a key shadowing a base field becomes
    /// visible with the base's value again after removal.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write_fields().remove(key)
    }

    /// Returns `true` if neither this layer nor any base layer holds a field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_fields().is_empty() && self.base.as_ref().is_none_or(|base| base.is_empty())
    }

    /// Merge the full layer chain into one map, own fields shadowing base fields.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Value> {
        let mut merged = self
            .base
            .as_ref()
            .map(|base| base.snapshot())
            .unwrap_or_default();
        for (key, value) in self.read_fields().iter() {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    fn read_fields(&self) -> RwLockReadGuard<'_, HashMap<String, Value>> {
        self.fields.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_fields(&self) -> RwLockWriteGuard<'_, HashMap<String, Value>> {
        self.fields.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("fields", &*self.read_fields())
            .field("base", &self.base)
            .finish()
    }
}

impl Serialize for Store {
    /// Serializes the merged view of the layer chain.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let merged = self.snapshot();
        let mut map = serializer.serialize_map(Some(merged.len()))?;
        for (key, value) in &merged {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
