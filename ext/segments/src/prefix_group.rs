//! Literal prefix with enumerated suffixes. Syntax: `prefix(a|b|...)`.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

use crate::meta::GroupMeta;

static SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9_.-]+)\(([^|)]+(?:\|[^|)]+)+)\)$").expect("prefix group syntax pattern")
});

/// `prefix(a|b|...)` — the segment must be the prefix concatenated with one
/// of the enumerated suffixes. Nothing is captured.
///
/// Highest priority of the default set: the expanded option set is the most
/// specific claim a dynamic branch can make.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrefixGroup;

impl PrefixGroup {
    pub const ID: &'static str = "prefixGroup";
    pub const PRIORITY: i32 = 100;
}

impl SegmentGrammar for PrefixGroup {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        "prefix(a|b)"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let prefix = caps.get(1)?.as_str();
        let options: HashSet<String> = caps
            .get(2)?
            .as_str()
            .split('|')
            .map(|suffix| format!("{prefix}{suffix}"))
            .collect();
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
