//! `Router` — the engine tying the static index, the dynamic tree, and the
//! grammar registry together.
//!
//! Registration classifies a pattern syntactically: fully literal patterns
//! land in the static index, patterns containing `:name?` segments are
//! expanded into every presence combination sharing one store, and
//! everything else walks (and lazily builds) the tree. Matching reads the
//! same structures: static index first, then a single committed descent of
//! the tree.
//!
//! # No backtracking
//!
//! Once a dynamic branch's predicate accepts a segment, the walk commits to
//! that branch and never reconsiders its siblings, even if the committed
//! branch dead-ends further down while a sibling would have matched.
//! Grammar priority is the sole conflict-resolution mechanism; two patterns
//! that are individually matchable can shadow each other depending on
//! priority. This is a deliberate trade of completeness for predictable,
//! allocation-light matching.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::descriptor::{Descriptor, Params, SegmentContext};
use crate::grammar::{GrammarRegistry, SegmentGrammar};
use crate::pattern;
use crate::route_match::RouteMatch;
use crate::static_index::StaticIndex;
use crate::store::Store;
use crate::tree::TreeNode;
use crate::RouterError;

type StoreFactory = Box<dyn Fn() -> Store + Send + Sync>;

/// How a route was registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// Resolved through the static index.
    Static,
    /// Resolved through the dynamic tree.
    Dynamic,
}

/// One registered route, as reported by [`Router::routes`].
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// The registered pattern (for optional expansion: one generated
    /// combination, exactly as it was registered).
    pub path: String,
    pub kind: RouteKind,
    pub store: Arc<Store>,
}

/// Builder for [`Router`], mirroring its construction options.
///
/// # Example
///
/// ```
/// use waymark::{Router, Store};
///
/// let router = Router::builder()
///     .store_factory(|| {
///         let store = Store::new();
///         store.set("version", 1);
///         store
///     })
///     .build()
///     .unwrap();
/// # let _ = router;
/// ```
pub struct RouterBuilder {
    store_factory: StoreFactory,
    grammars: Vec<Box<dyn SegmentGrammar>>,
    skip_grammar_validation: bool,
}

impl RouterBuilder {
    fn new() -> Self {
        Self {
            store_factory: Box::new(Store::new),
            grammars: Vec::new(),
            skip_grammar_validation: false,
        }
    }

    /// Replace the default store factory (`Store::new`).
    ///
    /// The factory runs once per registered pattern (once per *pattern* for
    /// optional expansion — every generated combination shares the result).
    #[must_use]
    pub fn store_factory(mut self, factory: impl Fn() -> Store + Send + Sync + 'static) -> Self {
        self.store_factory = Box::new(factory);
        self
    }

    /// Add an initial grammar; validated during [`build`](Self::build) in
    /// the order given.
    #[must_use]
    pub fn grammar(mut self, grammar: impl SegmentGrammar + 'static) -> Self {
        self.grammars.push(Box::new(grammar));
        self
    }

    /// Add a batch of initial grammars.
    #[must_use]
    pub fn grammars(mut self, grammars: Vec<Box<dyn SegmentGrammar>>) -> Self {
        self.grammars.extend(grammars);
        self
    }

    /// Skip the per-grammar self-test for trusted grammars.
    ///
    /// Uniqueness of ids and priorities is still enforced.
    #[must_use]
    pub fn skip_grammar_validation(mut self, skip: bool) -> Self {
        self.skip_grammar_validation = skip;
        self
    }

    /// Build the router.
    ///
    /// # Errors
    ///
    /// Any grammar-registration error from §grammar validation, for the
    /// first offending initial grammar.
    pub fn build(self) -> Result<Router, RouterError> {
        let mut registry = if self.skip_grammar_validation {
            GrammarRegistry::without_validation()
        } else {
            GrammarRegistry::new()
        };
        for grammar in self.grammars {
            registry.add(grammar)?;
        }
        Ok(Router {
            static_index: StaticIndex::new(),
            root: TreeNode::new(),
            registry,
            store_factory: self.store_factory,
        })
    }
}

/// The path-matching engine.
pub struct Router {
    static_index: StaticIndex,
    root: TreeNode,
    registry: GrammarRegistry,
    store_factory: StoreFactory,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// A router with the default store factory and no grammars.
    ///
    /// Without grammars only static paths can be registered or matched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            static_index: StaticIndex::new(),
            root: TreeNode::new(),
            registry: GrammarRegistry::new(),
            store_factory: Box::new(Store::new),
        }
    }

    /// Start building a router with custom options.
    #[must_use]
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Register an additional grammar on a live router.
    ///
    /// # Errors
    ///
    /// See [`GrammarRegistry::add`].
    pub fn use_grammar(
        &mut self,
        grammar: impl SegmentGrammar + 'static,
    ) -> Result<&mut Self, RouterError> {
        self.registry.add(Box::new(grammar))?;
        Ok(self)
    }

    /// The active grammar registry.
    #[must_use]
    pub fn grammars(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// Register `pattern`, returning the store attached to it.
    ///
    /// Static patterns go to the static index; patterns containing `:name?`
    /// segments are expanded into every presence combination, all sharing
    /// one factory-produced store; everything else is walked into the tree.
    ///
    /// # Errors
    ///
    /// - [`RouterError::EmptyPath`] — empty pattern.
    /// - [`RouterError::AlreadyRegistered`] — the pattern (or one of its
    ///   generated combinations) is already registered and the occupied
    ///   branch does not allow overriding.
    /// - [`RouterError::NoGrammarMatches`] — a dynamic segment no active
    ///   grammar claims.
    /// - [`RouterError::WildcardNotLast`] — a wildcard segment before the
    ///   final position.
    /// - [`RouterError::SegmentConflict`] — a segment claims a tree position
    ///   already held by the same grammar under a different parameter name.
    pub fn register(&mut self, pattern: &str) -> Result<Arc<Store>, RouterError> {
        if pattern.is_empty() {
            return Err(RouterError::EmptyPath);
        }
        if pattern::is_static_path(pattern) {
            return self.register_static(pattern, None);
        }
        if pattern::has_optional_segment(pattern) {
            let combinations = pattern::expand_optionals(pattern);
            let shared = Arc::new((self.store_factory)());
            for combination in &combinations {
                if pattern::is_static_path(combination) {
                    self.register_static(combination, Some(shared.clone()))?;
                } else {
                    self.register_dynamic(combination, Some(shared.clone()))?;
                }
            }
            return Ok(shared);
        }
        self.register_dynamic(pattern, None)
    }

    /// Remove `pattern`, reporting whether it was registered.
    ///
    /// A pattern containing `:name?` segments is expanded exactly as during
    /// registration and every combination is removed; the result is `true`
    /// iff *every* combination was found. Tree nodes left without children
    /// and without a store are pruned bottom-up.
    pub fn unregister(&mut self, pattern: &str) -> bool {
        if pattern::is_static_path(pattern) {
            return self.static_index.remove(pattern);
        }
        if pattern::has_optional_segment(pattern) {
            let mut all_found = true;
            for combination in pattern::expand_optionals(pattern) {
                let found = if pattern::is_static_path(&combination) {
                    self.static_index.remove(&combination)
                } else {
                    self.unregister_dynamic(&combination)
                };
                all_found &= found;
            }
            return all_found;
        }
        self.unregister_dynamic(pattern)
    }

    /// Match `path` against the registered routes.
    ///
    /// Never fails: returns `None` when nothing matches. Static lookups win
    /// outright; in the tree, literal children are tried before dynamic
    /// ones, dynamic children in ascending priority order, and the first
    /// accepting branch is committed to (no backtracking). A successful
    /// wildcard at a store-bearing node concludes the match immediately,
    /// regardless of remaining segments.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        if let Some(store) = self.static_index.get(path) {
            return Some(RouteMatch::new(store.clone(), Params::new()));
        }

        let segments = pattern::split_segments(path);
        let mut params = Params::new();
        let mut node = &self.root;

        for (index, segment) in segments.iter().enumerate() {
            if let Some(literal) = node.literal_children.get(*segment) {
                node = literal;
                continue;
            }
            if node.dynamic_children.is_empty() {
                return None;
            }

            let ctx = SegmentContext {
                segment: *segment,
                segments: &segments,
                index,
            };
            let mut committed = None;
            for child in &node.dynamic_children {
                let Some(descriptor) = child.descriptor.as_ref() else {
                    continue;
                };
                if descriptor.matches(&ctx, &mut params) {
                    if descriptor.is_wildcard() {
                        if let Some(store) = &child.store {
                            return Some(RouteMatch::new(store.clone(), params));
                        }
                    }
                    committed = Some(child);
                    break;
                }
            }
            node = committed?;
        }

        let store = node.store.as_ref()?;
        Some(RouteMatch::new(store.clone(), params))
    }

    /// Enumerate every registered route: the static index first, then a
    /// depth-first walk of the tree emitting each distinct registered
    /// pattern exactly once.
    #[must_use]
    pub fn routes(&self) -> Vec<RouteEntry> {
        let mut entries = Vec::with_capacity(self.static_index.len());
        for (path, store) in self.static_index.iter() {
            entries.push(RouteEntry {
                path: path.clone(),
                kind: RouteKind::Static,
                store: store.clone(),
            });
        }
        let mut seen = HashSet::new();
        Self::collect_routes(&self.root, &mut seen, &mut entries);
        entries
    }

    fn collect_routes(node: &TreeNode, seen: &mut HashSet<String>, out: &mut Vec<RouteEntry>) {
        if let (Some(store), Some(path)) = (&node.store, &node.registered_pattern) {
            if seen.insert(path.clone()) {
                out.push(RouteEntry {
                    path: path.clone(),
                    kind: RouteKind::Dynamic,
                    store: store.clone(),
                });
            }
        }
        for child in node.literal_children.values() {
            Self::collect_routes(child, seen, out);
        }
        for child in &node.dynamic_children {
            Self::collect_routes(child, seen, out);
        }
    }

    fn register_static(
        &mut self,
        path: &str,
        shared: Option<Arc<Store>>,
    ) -> Result<Arc<Store>, RouterError> {
        // Check before invoking the factory so a duplicate registration
        // never observes a factory call.
        if self.static_index.contains(path) {
            return Err(RouterError::AlreadyRegistered {
                path: path.to_string(),
            });
        }
        let base = shared.unwrap_or_else(|| Arc::new((self.store_factory)()));
        let layer = Arc::new(Store::layered(base));
        self.static_index.put(path, layer.clone())?;
        Ok(layer)
    }

    fn register_dynamic(
        &mut self,
        path: &str,
        shared: Option<Arc<Store>>,
    ) -> Result<Arc<Store>, RouterError> {
        let segments = pattern::split_segments(path);
        let store = shared.unwrap_or_else(|| Arc::new((self.store_factory)()));
        let last = segments.len().saturating_sub(1);

        let mut node = &mut self.root;
        for (index, segment) in segments.iter().enumerate() {
            if pattern::is_literal_segment(segment) {
                node = node
                    .literal_children
                    .entry((*segment).to_string())
                    .or_default();
                continue;
            }

            let Some(descriptor) = self.registry.resolve(segment) else {
                return Err(RouterError::NoGrammarMatches {
                    segment: (*segment).to_string(),
                });
            };
            if descriptor.is_wildcard() && index != last {
                return Err(RouterError::WildcardNotLast {
                    segment: (*segment).to_string(),
                });
            }

            // Exact redefinition (same grammar, same parameter name) reuses
            // the existing branch, so patterns can share subtrees.
            let existing = node.dynamic_children.iter().position(|child| {
                child.descriptor.as_ref().is_some_and(|d| {
                    d.grammar_id() == descriptor.grammar_id()
                        && d.param_name() == descriptor.param_name()
                })
            });

            let position = match existing {
                Some(position) => position,
                None => {
                    let conflicting = node.dynamic_children.iter().any(|child| {
                        child
                            .descriptor
                            .as_ref()
                            .is_some_and(|d| d.grammar_id() == descriptor.grammar_id())
                    });
                    if conflicting && !descriptor.allows_override() {
                        return Err(RouterError::SegmentConflict {
                            segment: (*segment).to_string(),
                            grammar_id: descriptor.grammar_id().to_string(),
                        });
                    }
                    // Insert keeping the list ascending by priority, after
                    // any equal-priority siblings (earlier registrations
                    // first).
                    let priority = descriptor.priority();
                    let position = node
                        .dynamic_children
                        .partition_point(|child| child.priority() <= priority);
                    let mut child = TreeNode::new();
                    child.descriptor = Some(descriptor);
                    node.dynamic_children.insert(position, child);
                    position
                }
            };
            node = &mut node.dynamic_children[position];
        }

        let terminal_allows_override = node
            .descriptor
            .as_ref()
            .is_some_and(Descriptor::allows_override);
        if node.store.is_some() && !terminal_allows_override {
            return Err(RouterError::AlreadyRegistered {
                path: path.to_string(),
            });
        }
        node.store = Some(store.clone());
        node.registered_pattern = Some(path.to_string());
        Ok(store)
    }

    fn unregister_dynamic(&mut self, path: &str) -> bool {
        let segments = pattern::split_segments(path);
        Self::cleanup(&self.registry, &mut self.root, &segments, 0).unregistered
    }

    /// Recursive descent for dynamic unregistration: clear the terminal
    /// store, then delete child nodes that became empty on the way back up,
    /// stopping as soon as a node still holds any child or store.
    fn cleanup(
        registry: &GrammarRegistry,
        node: &mut TreeNode,
        segments: &[&str],
        index: usize,
    ) -> CleanupOutcome {
        if index == segments.len() {
            if node.store.is_some() {
                node.store = None;
                node.registered_pattern = None;
                return CleanupOutcome {
                    should_delete: !node.has_children(),
                    unregistered: true,
                };
            }
            return CleanupOutcome {
                should_delete: !node.has_children(),
                unregistered: false,
            };
        }

        let segment = segments[index];
        if pattern::is_literal_segment(segment) {
            if let Some(child) = node.literal_children.get_mut(segment) {
                let outcome = Self::cleanup(registry, child, segments, index + 1);
                if outcome.should_delete {
                    node.literal_children.remove(segment);
                    return CleanupOutcome {
                        should_delete: node.is_prunable(),
                        unregistered: outcome.unregistered,
                    };
                }
                if outcome.unregistered {
                    return CleanupOutcome {
                        should_delete: false,
                        unregistered: true,
                    };
                }
            }
        } else {
            for grammar in registry.iter() {
                let Some(descriptor) = grammar.parse(segment) else {
                    continue;
                };
                for position in 0..node.dynamic_children.len() {
                    let claimed = node.dynamic_children[position]
                        .descriptor
                        .as_ref()
                        .is_some_and(|d| {
                            d.grammar_id() == grammar.id()
                                && d.param_name() == descriptor.param_name()
                        });
                    if !claimed {
                        continue;
                    }
                    let outcome = Self::cleanup(
                        registry,
                        &mut node.dynamic_children[position],
                        segments,
                        index + 1,
                    );
                    if outcome.should_delete {
                        node.dynamic_children.remove(position);
                        return CleanupOutcome {
                            should_delete: node.is_prunable(),
                            unregistered: outcome.unregistered,
                        };
                    }
                    if outcome.unregistered {
                        return CleanupOutcome {
                            should_delete: false,
                            unregistered: true,
                        };
                    }
                }
            }
        }

        CleanupOutcome {
            should_delete: false,
            unregistered: false,
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("static_routes", &self.static_index.len())
            .field("grammars", &self.registry.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct CleanupOutcome {
    should_delete: bool,
    unregistered: bool,
}
