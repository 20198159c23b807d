//! Plain named parameter. Syntax: `:name`.

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([a-zA-Z0-9_-]+)$").expect("param syntax pattern"));

/// `:name` — matches any single segment and captures it verbatim.
///
/// The catch-all of the default set: it sits at the second-highest priority
/// so every constrained grammar gets a chance first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Param;

impl Param {
    pub const ID: &'static str = "param";
    pub const PRIORITY: i32 = 700;
}

impl SegmentGrammar for Param {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        ":paramName"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1)?.as_str().to_string();
        Some(Descriptor::new(name.clone(), CaptureVerbatim { name }))
    }
}

#[derive(Debug)]
struct CaptureVerbatim {
    name: String,
}

impl SegmentPredicate for CaptureVerbatim {
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        params.insert(self.name.clone(), ctx.segment.to_string());
        true
    }
}
