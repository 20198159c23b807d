//! `RouteMatch` — the result of a successful path match.
//!
//! A match exposes the registered route's store fields as if merged with the
//! parameters captured while walking the path. The store itself is shared
//! with the router (and with every other pattern registered against the same
//! payload); the match result never mutates it. Writes through a
//! `RouteMatch` land in a per-result override map, so decorating one match
//! can never leak into another pattern's registration or into later matches.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::Params;
use crate::store::{Store, Value};

/// A matched route: shared store, per-result overrides, and captured params.
pub struct RouteMatch {
    store: Arc<Store>,
    overrides: HashMap<String, Value>,
    params: Params,
}

impl RouteMatch {
    pub(crate) fn new(store: Arc<Store>, params: Params) -> Self {
        Self {
            store,
            overrides: HashMap::new(),
            params,
        }
    }

    /// Look up a field: overrides first, then the shared store chain.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        self.store.get(key)
    }

    /// Set a field on this match result only.
    ///
    /// The shared store is not touched; the write is invisible to other
    /// matches and to every registration handle.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.overrides.insert(key.into(), value.into());
    }

    /// The parameter captured under `name`, if any.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// All parameters captured for this match.
    ///
    /// Empty for a static-index hit: static paths never carry parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The shared store this match resolved to.
    ///
    /// Writes through this handle persist on the route and are visible to
    /// subsequent matches.
    #[must_use]
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .field("overrides", &self.overrides)
            .field("store", &self.store)
            .finish()
    }
}
