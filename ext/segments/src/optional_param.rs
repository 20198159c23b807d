//! Optional named parameter. Syntax: `:name?`.

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([a-zA-Z0-9_-]+)\?$").expect("optional param syntax pattern"));

/// `:name?` — like `:name`, but the router expands patterns containing it
/// into every presence combination at registration time.
///
/// The descriptor allows overriding so the expanded combinations can share
/// tree positions with each other and with later registrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct OptionalParam;

impl OptionalParam {
    pub const ID: &'static str = "optionalParam";
    pub const PRIORITY: i32 = 600;
}

impl SegmentGrammar for OptionalParam {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        ":paramName?"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1)?.as_str().to_string();
        Some(Descriptor::new(name.clone(), CaptureVerbatim { name }).allow_override())
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
