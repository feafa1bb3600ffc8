//! The closed extraction rule table, in priority order.

use regex::{Captures, Match, Regex};
use std::fmt;
use std::sync::LazyLock;

/// Strategy family. Families are tried in `FAMILY_ORDER`; the first one that
/// yields at least one candidate wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `window.__INITIAL_STATE__ = {...}` parsed and walked.
    StructuredState,
    /// Bare `aweme = {...}` / `playerConfig = {...}` blobs parsed and walked.
    FlatKey,
    /// Regex scan for anything shaped like an `.mp4` URL.
    DirectUrl,
}

pub(crate) static FAMILY_ORDER: [Family; 3] =
    [Family::StructuredState, Family::FlatKey, Family::DirectUrl];

impl Family {
    pub fn label(self) -> &'static str {
        match self {
            Family::StructuredState => "structured-state",
            Family::FlatKey => "flat-key",
            Family::DirectUrl => "direct-url",
        }
    }

    /// True for families whose payload is a JSON blob rather than a URL.
    pub fn is_structured(self) -> bool {
        !matches!(self, Family::DirectUrl)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug)]
pub struct ExtractionRule {
    pub name: &'static str,
    pub family: Family,
    pub pattern: Regex,
    /// Capture group holding the payload. Structured rules capture the opening
    /// brace, so the group's start is where the JSON value begins. The direct
    /// rule captures the URL without its leading delimiter.
    pub group: usize,
}

impl ExtractionRule {
    fn new(name: &'static str, family: Family, pattern: &str, group: usize) -> Self {
        Self {
            name,
            family,
            // Patterns are compile-time constants covered by tests.
            pattern: Regex::new(pattern).expect("valid extraction pattern"),
            group,
        }
    }

    pub(crate) fn payload<'d>(&self, caps: &Captures<'d>) -> Option<Match<'d>> {
        caps.get(self.group)
    }
}

static RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    vec![
        ExtractionRule::new(
            "initial-state",
            Family::StructuredState,
            r"window\.__INITIAL_STATE__\s*=\s*(\{)",
            1,
        ),
        ExtractionRule::new(
            "aweme",
            Family::FlatKey,
            r"\baweme\s*=\s*(\{)",
            1,
        ),
        ExtractionRule::new(
            "player-config",
            Family::FlatKey,
            r"\bplayerConfig\s*=\s*(\{)",
            1,
        ),
        ExtractionRule::new(
            "direct-mp4",
            Family::DirectUrl,
            // A URL starts at a delimiter; a bare `//` inside a path is not one.
            r#"(?:^|[\s"'`=(>,:\[])((?:[A-Za-z][A-Za-z0-9+.\-]*:)?//[^"'\s<>]+\.mp4[^"'\s<>]*)"#,
            1,
        ),
    ]
});

/// All rules, in priority order.
pub fn rules() -> &'static [ExtractionRule] {
    &RULES
}

pub(crate) fn rules_for(family: Family) -> impl Iterator<Item = &'static ExtractionRule> {
    RULES.iter().filter(move |r| r.family == family)
}
