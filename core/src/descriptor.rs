//! `Descriptor` — what a grammar says about one pattern segment.
//!
//! When a grammar claims a segment (say `:id<\d+>`), it returns a descriptor
//! carrying the parameter name, the match predicate that will run against
//! incoming path segments, and flags that steer registration (wildcard,
//! override permission). The registry then stamps the descriptor with the
//! owning grammar's identity and priority; the stamped priority is what keeps
//! a node's dynamic children in deterministic match order.

use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Captured parameters, name → matched text.
pub type Params = HashMap<String, String>;

/// The segment under consideration plus its position in the full path.
///
/// `segments` holds every segment of the input path so that predicates which
/// consume the remainder (wildcards) can see past `index`.
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext<'a> {
    /// The path segment being tested. Always equals `segments[index]`.
    pub segment: &'a str,
    /// All segments of the input path.
    pub segments: &'a [&'a str],
    /// Position of `segment` within `segments`.
    pub index: usize,
}

/// A compiled per-segment match predicate.
///
/// Implementations both test the segment and, on success, write any captured
/// values into `params`. A predicate must not write on failure.
///
/// # Thread safety
///
/// Predicates are shared by concurrent `match_path` calls and must be
/// `Send + Sync`.
pub trait SegmentPredicate: Send + Sync + Debug {
    /// Test `ctx.segment`, writing captures into `params` on success.
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool;
}

/// Opaque grammar-specific metadata attached to a descriptor.
///
/// Grammars may expose their compiled internals (a validation regex, an
/// enumerated option set) for inspection and testing. Consumers downcast via
/// [`as_any`](DescriptorMeta::as_any):
///
/// ```ignore
/// if let Some(meta) = descriptor.metadata() {
///     if let Some(group) = meta.as_any().downcast_ref::<GroupMeta>() {
///         // use group.options
///     }
/// }
/// ```
pub trait DescriptorMeta: Send + Sync + Debug {
    /// Human-readable type tag, `snake_case` by convention (e.g. `"regex"`).
    fn meta_type_name(&self) -> &'static str;

    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A grammar's claim on one pattern segment.
#[derive(Debug)]
pub struct Descriptor {
    param_name: String,
    wildcard: bool,
    allows_override: bool,
    predicate: Box<dyn SegmentPredicate>,
    metadata: Option<Arc<dyn DescriptorMeta>>,
    // Stamped by the registry on acceptance.
    grammar_id: String,
    priority: i32,
    syntax: String,
}

impl Descriptor {
    /// Create a descriptor capturing under `param_name`.
    ///
    /// An empty `param_name` means the segment matches without capturing.
    pub fn new(param_name: impl Into<String>, predicate: impl SegmentPredicate + 'static) -> Self {
        Self {
            param_name: param_name.into(),
            wildcard: false,
            allows_override: false,
            predicate: Box::new(predicate),
            metadata: None,
            grammar_id: String::new(),
            priority: 0,
            syntax: String::new(),
        }
    }

    /// Mark this descriptor as a trailing wildcard.
    ///
    /// Registration rejects a wildcard segment anywhere but last, and a
    /// successful wildcard match concludes the whole path immediately.
    #[must_use]
    pub fn mark_wildcard(mut self) -> Self {
        self.wildcard = true;
        self
    }

    /// Permit a later registration to add a sibling branch (or replace the
    /// terminal payload) where it would otherwise conflict.
    #[must_use]
    pub fn allow_override(mut self) -> Self {
        self.allows_override = true;
        self
    }

    /// Attach opaque grammar-specific metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Arc<dyn DescriptorMeta>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The parameter name captured by this segment; empty if none.
    #[must_use]
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Whether this descriptor is a trailing wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Whether a later registration may override this branch.
    #[must_use]
    pub fn allows_override(&self) -> bool {
        self.allows_override
    }

    /// The opaque metadata attached by the grammar, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&Arc<dyn DescriptorMeta>> {
        self.metadata.as_ref()
    }

    /// Id of the grammar that produced this descriptor.
    ///
    /// Empty until the registry accepts the descriptor.
    #[must_use]
    pub fn grammar_id(&self) -> &str {
        &self.grammar_id
    }

    /// Stamped priority of the owning grammar; lower is tried first.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Stamped syntax example of the owning grammar.
    #[must_use]
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Run the match predicate against a path segment.
    pub fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        self.predicate.matches(ctx, params)
    }

    pub(crate) fn stamp(&mut self, grammar_id: &str, priority: i32, syntax: &str) {
        self.grammar_id = grammar_id.to_string();
        self.priority = priority;
        self.syntax = syntax.to_string();
    }
}
