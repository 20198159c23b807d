//! Literal prefix with enumerated suffixes, bare prefix allowed.
//! Syntax: `prefix(a|b|...)?`.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

use crate::meta::GroupMeta;

static SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.-]+)\(([^|)]+(?:\|[^|)]+)+)\)\?$")
        .expect("optional prefix group syntax pattern")
});

/// `prefix(a|b|...)?` — like [`PrefixGroup`](crate::PrefixGroup), but the
/// bare prefix is also an accepted segment. Nothing is captured.
///
/// The trailing `?` makes the *suffix* optional; the segment itself must
/// still be present in the path (this is not `:name?`-style expansion).
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionalPrefixGroup;

impl OptionalPrefixGroup {
    pub const ID: &'static str = "optionalPrefixGroup";
    pub const PRIORITY: i32 = 200;
}

impl SegmentGrammar for OptionalPrefixGroup {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        "prefix(a|b)?"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let prefix = caps.get(1)?.as_str();
        let mut options: HashSet<String> = caps
            .get(2)?
            .as_str()
            .split('|')
            .map(|suffix| format!("{prefix}{suffix}"))
            .collect();
        options.insert(prefix.to_string());
        Some(
            Descriptor::new(
                "",
                Membership {
                    options: options.clone(),
                },
            )
            .with_metadata(Arc::new(GroupMeta { options })),
        )
    }
}

#[derive(Debug)]
struct Membership {
    options: HashSet<String>,
}

impl SegmentPredicate for Membership {
    fn matches(&self, ctx: &SegmentContext<'_>, _params: &mut Params) -> bool {
        self.options.contains(ctx.segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(segments: &'a [&'a str]) -> SegmentContext<'a> {
        SegmentContext {
            segment: segments[0],
            segments,
            index: 0,
        }
    }

    #[test]
    fn test_parse_includes_bare_prefix() {
        let descriptor = OptionalPrefixGroup.parse("file(.css|.js)?").unwrap();
        let meta = descriptor.metadata().unwrap();
        let group = meta.as_any().downcast_ref::<GroupMeta>().unwrap();
        assert_eq!(group.options.len(), 3);
        assert!(group.options.contains("file"));
        assert!(group.options.contains("file.css"));
        assert!(group.options.contains("file.js"));
    }

    #[test]
    fn test_parse_requires_trailing_question_mark() {
        assert!(OptionalPrefixGroup.parse("file(.css|.js)").is_none());
        assert!(OptionalPrefixGroup.parse(":name(a|b)?").is_none());
    }

    #[test]
    fn test_predicate_accepts_bare_prefix() {
        let descriptor = OptionalPrefixGroup.parse("file(.css|.js)?").unwrap();
        let mut params = Params::new();
        assert!(descriptor.matches(&ctx(&["file"]), &mut params));
        assert!(descriptor.matches(&ctx(&["file.js"]), &mut params));
        assert!(!descriptor.matches(&ctx(&["file.ts"]), &mut params));
        assert!(params.is_empty());
    }
}
