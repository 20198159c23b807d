//! Enumerated-choice parameter. Syntax: `:name(a|b|...)`.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

use crate::meta::GroupMeta;

static SYNTAX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:([a-zA-Z0-9_-]+)\(([^|)]+(?:\|[^|)]+)+)\)$").expect("group param syntax pattern")
});

/// `:name(a|b|...)` — the segment must equal one of the enumerated options;
/// the matching option is captured under `name`.
///
/// At least two options are required; `(a)` is not group syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupParam;

impl GroupParam {
    pub const ID: &'static str = "groupParam";
    pub const PRIORITY: i32 = 300;
}

impl SegmentGrammar for GroupParam {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        ":paramName(a|b)"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1)?.as_str().to_string();
        let options: HashSet<String> = caps
            .get(2)?
            .as_str()
            .split('|')
            .map(ToString::to_string)
            .collect();
        Some(
            Descriptor::new(
                name.clone(),
                MatchOneOf {
                    name,
                    options: options.clone(),
                },
            )
            .with_metadata(Arc::new(GroupMeta { options })),
        )
    }
}

#[derive(Debug)]
struct MatchOneOf {
    name: String,
    options: HashSet<String>,
}

impl SegmentPredicate for MatchOneOf {
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        if !self.options.contains(ctx.segment) {
            return false;
        }
        params.insert(self.name.clone(), ctx.segment.to_string());
        true
    }
}
