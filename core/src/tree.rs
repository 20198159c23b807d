//! Tree nodes for dynamic-path matching.
//!
//! Each node represents one path depth. Literal children are keyed by exact
//! segment text; dynamic children are kept in ascending order of their
//! stamped descriptor priority, which is what makes match-time branch
//! selection deterministic. A node reached through a dynamic branch carries
//! the descriptor that claimed it; a node terminating a registered pattern
//! carries the pattern's store and the original pattern string, always both.

use std::collections::HashMap;
use std::sync::Arc;

use crate::descriptor::Descriptor;
use crate::store::Store;

#[derive(Debug, Default)]
pub(crate) struct TreeNode {
    pub(crate) literal_children: HashMap<String, TreeNode>,
    /// Ascending by stamped descriptor priority.
    pub(crate) dynamic_children: Vec<TreeNode>,
    /// Present only on nodes reached through a dynamic branch.
    pub(crate) descriptor: Option<Descriptor>,
    /// Present only on nodes terminating a registered pattern.
    pub(crate) store: Option<Arc<Store>>,
    /// Set and cleared together with `store`.
    pub(crate) registered_pattern: Option<String>,
}

impl TreeNode {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The stamped priority of this node's descriptor.
    ///
    /// Only meaningful on dynamic children; literal children have no
    /// descriptor and sort last if ever asked.
    pub(crate) fn priority(&self) -> i32 {
        self.descriptor
            .as_ref()
            .map_or(i32::MAX, Descriptor::priority)
    }

    pub(crate) fn has_children(&self) -> bool {
        !self.literal_children.is_empty() || !self.dynamic_children.is_empty()
    }

    /// A node is pruned when it holds no children and no store.
    pub(crate) fn is_prunable(&self) -> bool {
        !self.has_children() && self.store.is_none()
    }
}
