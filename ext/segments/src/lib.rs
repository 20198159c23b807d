//! Default segment grammars for the waymark path matching engine.
//!
//! Each grammar is an independent [`SegmentGrammar`] implementation that the
//! engine consults at registration time; none of them is special to the
//! core. The set covers the conventional route syntaxes, competing under a
//! fixed priority order (lower = tried first):
//!
//! | Syntax | Grammar | Priority |
//! |--------|---------|----------|
//! | `prefix(a\|b)`  | [`PrefixGroup`]         | 100 |
//! | `prefix(a\|b)?` | [`OptionalPrefixGroup`] | 200 |
//! | `:name(a\|b)`   | [`GroupParam`]          | 300 |
//! | `:name<\d+>`    | [`RegexParam`]          | 400 |
//! | `:name.ext`     | [`ExtensionParam`]      | 500 |
//! | `:name?`        | [`OptionalParam`]       | 600 |
//! | `:name`         | [`Param`]               | 700 |
//! | `*` / `:name*`  | [`Wildcard`]            | 800 |
//!
//! Literal segments always win over every grammar, regardless of priority.
//!
//! # Example
//!
//! ```
//! use waymark::Router;
//!
//! let mut router = Router::builder()
//!     .grammars(waymark_segments::defaults())
//!     .build()?;
//!
//! router.register("/posts/:year<\\d{4}>/:slug")?;
//!
//! let matched = router.match_path("/posts/2024/waymark-ships").expect("matches");
//! assert_eq!(matched.param("year"), Some("2024"));
//! assert_eq!(matched.param("slug"), Some("waymark-ships"));
//! # Ok::<(), waymark::RouterError>(())
//! ```

use waymark::SegmentGrammar;

mod extension_param;
mod group_param;
mod meta;
mod optional_param;
mod optional_prefix_group;
mod param;
mod prefix_group;
mod regex_param;
mod wildcard;

pub use extension_param::ExtensionParam;
pub use group_param::GroupParam;
pub use meta::{ExtensionMeta, GroupMeta, RegexMeta};
pub use optional_param::OptionalParam;
pub use optional_prefix_group::OptionalPrefixGroup;
pub use param::Param;
pub use prefix_group::PrefixGroup;
pub use regex_param::RegexParam;
pub use wildcard::Wildcard;

/// The full default grammar set, in ascending priority order.
///
/// Feed it to [`RouterBuilder::grammars`](waymark::RouterBuilder::grammars),
/// or pick individual grammars for a leaner router.
#[must_use]
pub fn defaults() -> Vec<Box<dyn SegmentGrammar>> {
    vec![
        Box::new(PrefixGroup),
        Box::new(OptionalPrefixGroup),
        Box::new(GroupParam),
        Box::new(RegexParam),
        Box::new(ExtensionParam),
        Box::new(OptionalParam),
        Box::new(Param),
        Box::new(Wildcard),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_priority_ordered_and_unique() {
        let grammars = defaults();
        assert_eq!(grammars.len(), 8);

        let priorities: Vec<i32> = grammars.iter().map(|g| g.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(priorities, sorted);

        let mut ids: Vec<&str> = grammars.iter().map(|g| g.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), grammars.len());
    }

    #[test]
    fn test_every_default_passes_registry_validation() {
        let mut registry = waymark::GrammarRegistry::new();
        for grammar in defaults() {
            registry.add(grammar).unwrap();
        }
        assert_eq!(registry.len(), 8);
    }
}
