//! Pattern classification and optional-segment expansion.
//!
//! Classification is purely syntactic and independent of registered
//! grammars: a path whose segments all stay within the literal character
//! class `[A-Za-z0-9 _.-]` is static, everything else is dynamic. Lookups
//! and registrations key on the raw string as given — no normalization —
//! so `/a` and `/a/` are distinct (the latter classifies dynamic because
//! the anchored path shape forbids a trailing slash).

use once_cell::sync::Lazy;
use regex::Regex;

/// Whole-path shape for the static fast path: `/`, or slash-separated
/// literal segments with an optional leading slash and no trailing slash.
static STATIC_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/|/?(?:[a-zA-Z0-9 _.-]+)(?:/[a-zA-Z0-9 _.-]+)*)$")
        .expect("static path pattern")
});

/// One literal segment.
static LITERAL_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 _.-]+$").expect("literal segment pattern"));

/// One optional-parameter segment, `:name?`.
static OPTIONAL_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:[a-zA-Z0-9_-]+\?$").expect("optional segment pattern"));

/// Unanchored probe for an optional-parameter segment anywhere in a path.
static OPTIONAL_IN_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/:[a-zA-Z0-9_-]+\?").expect("optional probe pattern"));

/// Whether `path` qualifies for the static index.
pub(crate) fn is_static_path(path: &str) -> bool {
    STATIC_PATH.is_match(path)
}

/// Whether `segment` is a literal (non-dynamic) segment.
pub(crate) fn is_literal_segment(segment: &str) -> bool {
    LITERAL_SEGMENT.is_match(segment)
}

/// Whether `segment` is an optional-parameter segment (`:name?`).
pub(crate) fn is_optional_segment(segment: &str) -> bool {
    OPTIONAL_SEGMENT.is_match(segment)
}

/// Whether `path` contains an optional-parameter segment anywhere.
pub(crate) fn has_optional_segment(path: &str) -> bool {
    OPTIONAL_IN_PATH.is_match(path)
}

/// Split a path on `/`, dropping the empty segments produced by leading,
/// trailing, or doubled slashes.
pub(crate) fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Enumerate every presence combination of the optional segments in `path`.
///
/// Bit `k` of the mask controls the `k`-th optional segment in left-to-right
/// order; non-optional segments are always included. With no optional
/// segments the result is the path itself (re-joined); a combination that
/// drops every segment collapses to `/`. Combinations are deduplicated
/// preserving first-seen order.
pub(crate) fn expand_optionals(path: &str) -> Vec<String> {
    let segments = split_segments(path);
    let optional_indexes: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| is_optional_segment(segment))
        .map(|(index, _)| index)
        .collect();

    if optional_indexes.is_empty() {
        return vec![format!("/{}", segments.join("/"))];
    }

    let total = 1usize << optional_indexes.len();
    let mut combinations: Vec<String> = Vec::with_capacity(total);
    for mask in 0..total {
        let included: Vec<&str> = segments
            .iter()
            .enumerate()
            .filter(|(index, segment)| {
                if !is_optional_segment(segment) {
                    return true;
                }
                optional_indexes
                    .iter()
                    .position(|&opt| opt == *index)
                    .is_some_and(|bit| mask & (1 << bit) != 0)
            })
            .map(|(_, segment)| *segment)
            .collect();

        let combination = if included.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", included.join("/"))
        };
        if !combinations.contains(&combination) {
            combinations.push(combination);
        }
    }
    combinations
}
