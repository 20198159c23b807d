//! Regex-constrained parameter. Syntax: `:name<pattern>`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

use crate::meta::RegexMeta;

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([a-zA-Z0-9_-]+)<(.+)>$").expect("regex param syntax pattern"));

/// `:name<pattern>` — the segment must match `pattern` anchored at both
/// ends; the captured value is the regex-matched text.
///
/// An inner pattern that fails to compile means the segment is not claimed,
/// so registration surfaces it as an unclaimed segment rather than a partial
/// descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexParam;

impl RegexParam {
    pub const ID: &'static str = "regexParam";
    pub const PRIORITY: i32 = 400;
}

impl SegmentGrammar for RegexParam {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        ":paramName<\\d+>"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1)?.as_str().to_string();
        let inner = caps.get(2)?.as_str();
        let regex = Regex::new(&format!("^{inner}$")).ok()?;
        Some(
            Descriptor::new(
                name.clone(),
                MatchPattern {
                    name,
                    regex: regex.clone(),
                },
            )
            .with_metadata(Arc::new(RegexMeta { regex })),
        )
    }
}

#[derive(Debug)]
struct MatchPattern {
    name: String,
    regex: Regex,
}

impl SegmentPredicate for MatchPattern {
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        let Some(found) = self.regex.find(ctx.segment) else {
            return false;
        };
        // The matched text, not the whole segment: a top-level alternation
        // can anchor only one side, and the capture follows the match.
        params.insert(self.name.clone(), found.as_str().to_string());
        true
    }
}
