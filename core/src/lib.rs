//! waymark — a tree-based path matching engine with pluggable segment
//! grammars.
//!
//! Given a set of registered route patterns, waymark maps an incoming path
//! string to the store attached at registration time plus any parameters
//! captured along the way. It is the matching core beneath an HTTP-style
//! router: no I/O, no sockets, no request/response types — callers bring
//! those and drive [`Router::register`] / [`Router::match_path`] /
//! [`Router::unregister`].
//!
//! # Architecture
//!
//! Two structures back every router:
//!
//! - **Static index** — fully literal paths resolve with one O(1) lookup.
//! - **Dynamic tree** — everything else walks a tree whose nodes branch by
//!   exact segment text or by a priority-ordered list of grammar-produced
//!   branches.
//!
//! Dynamic segment syntax is not baked in. A [`SegmentGrammar`] recognizes
//! one syntax (say `:name` or `:name<\d+>`) and produces a [`Descriptor`]
//! carrying the match predicate for it; grammars compete for each pattern
//! segment under a fixed priority order, lower first. The
//! `waymark-segments` crate ships the default set.
//!
//! # Example
//!
//! ```
//! use waymark::{Descriptor, Params, Router, SegmentContext, SegmentGrammar, SegmentPredicate};
//!
//! /// Recognizes `:name` segments and captures the matched text.
//! #[derive(Debug)]
//! struct Named;
//!
//! #[derive(Debug)]
//! struct CaptureAs {
//!     name: String,
//! }
//!
//! impl SegmentPredicate for CaptureAs {
//!     fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
//!         params.insert(self.name.clone(), ctx.segment.to_string());
//!         true
//!     }
//! }
//!
//! impl SegmentGrammar for Named {
//!     fn id(&self) -> &str { "named" }
//!     fn priority(&self) -> i32 { 700 }
//!     fn syntax(&self) -> &str { ":name" }
//!     fn parse(&self, segment: &str) -> Option<Descriptor> {
//!         let name = segment.strip_prefix(':')?;
//!         (!name.is_empty()).then(|| {
//!             Descriptor::new(name, CaptureAs { name: name.to_string() })
//!         })
//!     }
//! }
//!
//! let mut router = Router::builder().grammar(Named).build()?;
//! router.register("/users/:id")?.set("handler", "get_user");
//!
//! let matched = router.match_path("/users/42").expect("route matches");
//! assert_eq!(matched.get("handler"), Some("get_user".into()));
//! assert_eq!(matched.param("id"), Some("42"));
//!
//! assert!(router.match_path("/users").is_none());
//! # Ok::<(), waymark::RouterError>(())
//! ```
//!
//! # What the engine promises
//!
//! - Literal branches always win over dynamic ones at the same depth.
//! - Dynamic branches are tried in ascending grammar priority, and the
//!   first accepting branch is committed to — there is **no backtracking**.
//! - `match_path` never fails; registration errors are [`RouterError`]s.
//! - Concurrent matching against an unchanging router is safe; mutation
//!   requires `&mut Router` and is the caller's to serialize.

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod descriptor;
mod grammar;
mod pattern;
mod route_match;
mod router;
mod static_index;
mod store;
mod tree;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use descriptor::{Descriptor, DescriptorMeta, Params, SegmentContext, SegmentPredicate};
pub use grammar::{GrammarRegistry, SegmentGrammar};
pub use route_match::RouteMatch;
pub use router::{RouteEntry, RouteKind, Router, RouterBuilder};
pub use store::{Store, Value};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use waymark::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Descriptor, DescriptorMeta, GrammarRegistry, Params, RouteEntry, RouteKind, RouteMatch,
        Router, RouterBuilder, RouterError, SegmentContext, SegmentGrammar, SegmentPredicate,
        Store, Value,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from registration and grammar management.
///
/// Every failure is synchronous and fatal to the triggering call; the engine
/// performs no retries and no recovery. `match_path` never produces one of
/// these — it returns `None` for a miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The pattern string is empty.
    EmptyPath,
    /// The path (or one generated optional combination) is already
    /// registered.
    AlreadyRegistered {
        /// The offending pattern.
        path: String,
    },
    /// No active grammar claims a dynamic segment.
    NoGrammarMatches {
        /// The unclaimed segment.
        segment: String,
    },
    /// A wildcard segment appeared before the final position.
    WildcardNotLast {
        /// The wildcard segment.
        segment: String,
    },
    /// A segment claims a tree position already held by the same grammar
    /// under a different parameter name.
    SegmentConflict {
        /// The conflicting segment.
        segment: String,
        /// Id of the grammar both registrations resolved to.
        grammar_id: String,
    },
    /// A grammar was added with an empty id.
    GrammarMissingId,
    /// A grammar was added with an id that is already registered.
    GrammarIdExists {
        /// The duplicated id.
        id: String,
    },
    /// A grammar was added with a priority that is already registered.
    GrammarPriorityExists {
        /// The duplicated priority.
        priority: i32,
    },
    /// A grammar was added with an empty syntax example.
    GrammarMissingSyntax {
        /// Id of the offending grammar.
        id: String,
    },
    /// A grammar rejected its own syntax example during self-test.
    SyntaxSelfTestFailed {
        /// Id of the offending grammar.
        id: String,
        /// The syntax example it rejected.
        syntax: String,
    },
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "path cannot be empty"),
            Self::AlreadyRegistered { path } => {
                write!(f, "path already registered: {path}")
            }
            Self::NoGrammarMatches { segment } => {
                write!(
                    f,
                    "no grammar claims segment \"{segment}\" — register a grammar for this syntax"
                )
            }
            Self::WildcardNotLast { segment } => {
                write!(
                    f,
                    "wildcard segment \"{segment}\" must be the last segment of the pattern"
                )
            }
            Self::SegmentConflict {
                segment,
                grammar_id,
            } => {
                write!(
                    f,
                    "segment \"{segment}\" conflicts with an existing registration \
                     under grammar \"{grammar_id}\""
                )
            }
            Self::GrammarMissingId => write!(f, "grammar id cannot be empty"),
            Self::GrammarIdExists { id } => {
                write!(f, "a grammar with id \"{id}\" is already registered")
            }
            Self::GrammarPriorityExists { priority } => {
                write!(f, "a grammar with priority {priority} is already registered")
            }
            Self::GrammarMissingSyntax { id } => {
                write!(f, "grammar \"{id}\" has an empty syntax example")
            }
            Self::SyntaxSelfTestFailed { id, syntax } => {
                write!(
                    f,
                    "grammar \"{id}\" rejected its own syntax example \"{syntax}\""
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
