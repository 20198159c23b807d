//! Extension-suffixed parameter. Syntax: `:name.ext`.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use waymark::{Descriptor, Params, SegmentContext, SegmentGrammar, SegmentPredicate};

use crate::meta::ExtensionMeta;

static SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:([a-zA-Z0-9_-]+)\.(.+)$").expect("extension param syntax pattern"));

/// `:name.ext` — the segment must end with the extension text; the captured
/// value is the segment with the extension and its preceding character
/// stripped.
///
/// The suffix check is on the extension text alone, not `.ext`: a segment
/// like `styles-css` satisfies `:file.css` and captures `styles`. A
/// segment no longer than the extension captures the empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionParam;

impl ExtensionParam {
    pub const ID: &'static str = "extensionParam";
    pub const PRIORITY: i32 = 500;
}

impl SegmentGrammar for ExtensionParam {
    fn id(&self) -> &str {
        Self::ID
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn syntax(&self) -> &str {
        ":file.css"
    }

    fn parse(&self, segment: &str) -> Option<Descriptor> {
        let caps = SYNTAX.captures(segment)?;
        let name = caps.get(1)?.as_str().to_string();
        let extension = caps.get(2)?.as_str().to_string();
        Some(
            Descriptor::new(
                name.clone(),
                MatchSuffix {
                    name,
                    extension: extension.clone(),
                },
            )
            .with_metadata(Arc::new(ExtensionMeta { extension })),
        )
    }
}

#[derive(Debug)]
struct MatchSuffix {
    name: String,
    extension: String,
}

impl SegmentPredicate for MatchSuffix {
    fn matches(&self, ctx: &SegmentContext<'_>, params: &mut Params) -> bool {
        if !ctx.segment.ends_with(self.extension.as_str()) {
            return false;
        }
        let cut = ctx.segment.len().saturating_sub(self.extension.len() + 1);
        let captured = ctx.segment.get(..cut).unwrap_or("").to_string();
        params.insert(self.name.clone(), captured);
        true
    }
}
