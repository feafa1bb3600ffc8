//! Candidate URL newtype and normalization.

use std::fmt;

/// Substring every direct-URL candidate must contain.
pub const MEDIA_MARKER: &str = ".mp4";

/// A URL pulled out of a raw document, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateUrl(String);

impl CandidateUrl {
    /// Trims surrounding whitespace and rewrites protocol-relative `//host/...`
    /// to `https://host/...`. Anything else is kept as written.
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("//") {
            Self(format!("https:{raw}"))
        } else {
            Self(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_media_marker(&self) -> bool {
        self.0.contains(MEDIA_MARKER)
    }
}

impl fmt::Display for CandidateUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CandidateUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CandidateUrl> for String {
    fn from(c: CandidateUrl) -> Self {
        c.0
    }
}

impl PartialEq<&str> for CandidateUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_gets_https() {
        assert_eq!(
            CandidateUrl::normalize("//cdn.example.com/a.mp4").as_str(),
            "https://cdn.example.com/a.mp4"
        );
    }

    #[test]
    fn absolute_urls_untouched() {
        assert_eq!(
            CandidateUrl::normalize("http://a.com/v.mp4?x=1").as_str(),
            "http://a.com/v.mp4?x=1"
        );
        assert_eq!(
            CandidateUrl::normalize("  https://a.com/v.mp4 ").as_str(),
            "https://a.com/v.mp4"
        );
    }

    #[test]
    fn media_marker() {
        assert!(CandidateUrl::normalize("https://a.com/v.mp4?sig=1").has_media_marker());
        assert!(!CandidateUrl::normalize("https://a.com/play/?id=1").has_media_marker());
    }
}
