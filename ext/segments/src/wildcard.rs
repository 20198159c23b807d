//! Trailing wildcard. Syntax: `*` or `:name*`.

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\*|:([a-zA-Z0-9_-]+)\*)$").expect("wildcard syntax pattern"));

/// `*` / `:name*` — consumes the current segment and everything after it,
/// capturing the remainder joined with `/` under `name` (or `*` for the
/// anonymous form).
///
/// Lowest priority of the default set: a wildcard only fires when nothing
/// more specific claimed the segment. Registration rejects it anywhere but
/// the final position, and a successful wildcard match ends the whole path
/// immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wildcard;

impl Wildcard {
    pub const ID: &'static str = "wildcard";
    pub const PRIORITY: i32 = 800;
}

impl SegmentGrammar for Wildcard {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        "*"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1).map_or("*", |m| m.as_str()).to_string();
        Some(Descriptor::new(name.clone(), CaptureRemainder { name }).mark_wildcard())
    }
}

#[derive(Debug)]
struct CaptureRemainder {
    name: String,
}

impl SegmentPredicate for CaptureRemainder {
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        let rest = ctx.segments[ctx.index..].join("/");
        params.insert(self.name.clone(), rest);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let anonymous = Wildcard.parse("*").unwrap();
        assert_eq!(anonymous.param_name(), "*");
        assert!(anonymous.is_wildcard());

        let named = Wildcard.parse(":rest*").unwrap();
        assert_eq!(named.param_name(), "rest");
        assert!(named.is_wildcard());

        assert!(Wildcard.parse(":rest").is_none());
        assert!(Wildcard.parse("**").is_none());
        assert!(Wildcard.parse("a*").is_none());
    }

    #[test]
    fn test_predicate_joins_remainder() {
        let descriptor = Wildcard.parse(":rest*").unwrap();
        let segments = ["files", "a", "b", "c"];
        let ctx = SegmentContext {
            segment: "a",
            segments: &segments,
            index: 1,
        };
        let mut params = Params::new();
        assert!(descriptor.matches(&ctx, &mut params));
        assert_eq!(params.get("rest").map(String::as_str), Some("a/b/c"));
    }

    #[test]
    fn test_predicate_single_segment_remainder() {
        let descriptor = Wildcard.parse("*").unwrap();
        let segments = ["only"];
        let ctx = SegmentContext {
            segment: "only",
            segments: &segments,
            index: 0,
        };
        let mut params = Params::new();
        assert!(descriptor.matches(&ctx, &mut params));
        assert_eq!(params.get("*").map(String::as_str), Some("only"));
    }
}
