//! `SegmentGrammar` — pluggable segment syntax — and its priority-ordered
//! registry.
//!
//! A grammar recognizes one dynamic segment syntax. At registration time the
//! registry asks each grammar, in ascending priority order, whether it claims
//! a pattern segment; the first [`Descriptor`] wins and is stamped with the
//! grammar's identity. Match time never consults grammars: the stamped
//! descriptors already sit in the tree, pre-ordered.
//!
//! New grammars are validated on entry (unique id and priority, non-empty
//! syntax example, and a self-test parse of that example). Validation can be
//! skipped for trusted grammars via
//! [`RouterBuilder::skip_grammar_validation`](crate::RouterBuilder::skip_grammar_validation);
//! the uniqueness checks always run, since the registry's ordering contract
//! depends on them.

use std::fmt::Debug;

use crate::descriptor::{Descriptor, Params, SegmentContext};
use crate::RouterError;

/// A pluggable strategy recognizing one dynamic segment syntax.
///
/// # Contract
///
/// - `id` and `priority` are unique among all grammars in one registry.
/// - `syntax` is a non-empty example segment that `parse` must claim; the
///   registry uses it for self-testing.
/// - `parse` returns `None` for segments it does not recognize — including
///   segments it recognizes but cannot compile (a malformed inner regex, for
///   example). It must be pure: same segment, same answer.
///
/// # Example
///
/// ```
/// use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};
///
/// /// Matches the literal segment syntax `@checksum` and nothing else.
/// #[derive(Debug)]
/// struct Checksum;
///
/// #[derive(Debug)]
/// struct HexPredicate;
///
/// impl SegmentPredicate for HexPredicate {
///     fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
///         if ctx.segment.len() == 8 && ctx.segment.bytes().all(|b| b.is_ascii_hexdigit()) {
///             params.insert("checksum".to_string(), ctx.segment.to_string());
///             return true;
///         }
///         false
///     }
/// }
///
/// impl SegmentGrammar for Checksum {
///     fn id(&self) -> &str { "checksum" }
///     fn priority(&self) -> i32 { 50 }
///     fn syntax(&self) -> &str { "@checksum" }
///     fn parse(&self, segment: &str) -> Option<Descriptor> {
///         (segment == "@checksum").then(|| Descriptor::new("checksum", HexPredicate))
///     }
/// }
/// ```
pub trait SegmentGrammar: Send + Sync + Debug {
    /// Unique identifier of this grammar.
    fn id(&self) -> &str;

    /// Unique precedence; lower values are consulted first.
    fn priority(&self) -> i32;

    /// Example segment in this grammar's syntax, used for self-testing.
    fn syntax(&self) -> &str;

    /// Claim a pattern segment, or signal "not mine" with `None`.
    fn parse(&self, segment: &str) -> Option<Descriptor>;
}

impl SegmentGrammar for Box<dyn SegmentGrammar> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn syntax(&self) -> &str {
        (**self).syntax()
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        (**self).parse(segment)
    }
}

/// Priority-ordered set of active grammars.
#[derive(Debug)]
pub struct GrammarRegistry {
    /// Sorted ascending by priority; re-sorted after every successful add.
    grammars: Vec<Box<dyn SegmentGrammar>>,
    validate: bool,
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarRegistry {
    /// Create an empty registry that validates grammars on entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammars: Vec::new(),
            validate: true,
        }
    }

    /// Create an empty registry that skips the self-test for added grammars.
    ///
    /// Uniqueness checks (id, priority) and the non-empty id/syntax checks
    /// still apply.
    #[must_use]
    pub fn without_validation() -> Self {
        Self {
            grammars: Vec::new(),
            validate: false,
        }
    }

    /// Add a grammar, validating it first.
    ///
    /// # Errors
    ///
    /// - [`RouterError::GrammarMissingId`] — empty id.
    /// - [`RouterError::GrammarIdExists`] — id already registered.
    /// - [`RouterError::GrammarPriorityExists`] — priority already registered.
    /// - [`RouterError::GrammarMissingSyntax`] — empty syntax example.
    /// - [`RouterError::SyntaxSelfTestFailed`] — the grammar rejects its own
    ///   syntax example (skipped when validation is off).
    pub fn add(&mut self, grammar: Box<dyn SegmentGrammar>) -> Result<(), RouterError> {
        let id = grammar.id();
        if id.is_empty() {
            return Err(RouterError::GrammarMissingId);
        }
        if self.grammars.iter().any(|g| g.id() == id) {
            return Err(RouterError::GrammarIdExists { id: id.to_string() });
        }
        let priority = grammar.priority();
        if self.grammars.iter().any(|g| g.priority() == priority) {
            return Err(RouterError::GrammarPriorityExists { priority });
        }
        let syntax = grammar.syntax();
        if syntax.is_empty() {
            return Err(RouterError::GrammarMissingSyntax { id: id.to_string() });
        }

        if self.validate {
            let Some(descriptor) = grammar.parse(syntax) else {
                return Err(RouterError::SyntaxSelfTestFailed {
                    id: id.to_string(),
                    syntax: syntax.to_string(),
                });
            };
            // Exercise the predicate once with an empty-segment probe so a
            // broken predicate surfaces at registration, not at match time.
            let probe_segments = [""];
            let probe = SegmentContext {
                segment: "",
                segments: &probe_segments,
                index: 0,
            };
            let mut scratch = Params::new();
            let _ = descriptor.matches(&probe, &mut scratch);
        }

        self.grammars.push(grammar);
        self.grammars.sort_by_key(|g| g.priority());
        Ok(())
    }

    /// Classify a pattern segment: first claiming grammar wins, in priority
    /// order. The returned descriptor is stamped with the owning grammar's
    /// id, priority, and syntax example.
    ///
    /// Used only at registration time; matching walks pre-built branches.
    #[must_use]
    pub fn resolve(&self, segment: &str) -> Option<Descriptor> {
        for grammar in &self.grammars {
            if let Some(mut descriptor) = grammar.parse(segment) {
                descriptor.stamp(grammar.id(), grammar.priority(), grammar.syntax());
                return Some(descriptor);
            }
        }
        None
    }

    /// Iterate the active grammars in ascending priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SegmentGrammar> {
        self.grammars.iter().map(|grammar| grammar.as_ref())
    }

    /// Number of active grammars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    /// Returns `true` if no grammars are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}
