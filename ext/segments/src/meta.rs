//! Opaque descriptor metadata attached by the default grammars.
//!
//! Each grammar that compiles something at parse time (an option set, a
//! validation regex, a required suffix) exposes it here so tooling and tests
//! can inspect a registered branch by downcasting
//! [`Descriptor::metadata`](waymark::Descriptor::metadata).

use std::any::Any;
use std::collections::HashSet;

use regex::Regex;
use waymark::DescriptorMeta;

/// Compiled validation regex attached by [`RegexParam`](crate::RegexParam).
#[derive(Debug)]
pub struct RegexMeta {
    /// The anchored pattern the segment must match.
    pub regex: Regex,
}

impl DescriptorMeta for RegexMeta {
    fn meta_type_name(&self) -> &'static str {
        "regex"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Enumerated segment options attached by the group grammars.
///
/// For the prefix-group grammars the options are the fully expanded
/// segments (prefix + suffix), not the bare suffixes.
#[derive(Debug)]
pub struct GroupMeta {
    pub options: HashSet<String>,
}

impl DescriptorMeta for GroupMeta {
    fn meta_type_name(&self) -> &'static str {
        "group"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Required suffix attached by [`ExtensionParam`](crate::ExtensionParam).
#[derive(Debug)]
pub struct ExtensionMeta {
    /// The extension text after the dot, e.g. `"css"`.
    pub extension: String,
}

impl DescriptorMeta for ExtensionMeta {
    fn meta_type_name(&self) -> &'static str {
        "extension"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
