//! Media URL extraction from raw page text.
//!
//! A document (HTML page, API body, saved file) is scanned with a fixed chain
//! of rule families, most structured first:
//!
//! 1. `window.__INITIAL_STATE__ = {...}`: parse the object, walk it for
//!    `video.play_addr.url_list`.
//! 2. `aweme = {...}` / `playerConfig = {...}`: same parse and walk.
//! 3. Any substring shaped like an `.mp4` URL.
//!
//! The first family that yields at least one URL wins; later families are not
//! run. A structured block that fails to parse counts as "no result" for its
//! family. Extraction never fails: the worst case is an empty sequence.

mod candidate;
mod rules;
mod walk;

pub use candidate::{CandidateUrl, MEDIA_MARKER};
pub use rules::{rules, ExtractionRule, Family};
pub use walk::urls_from_value;

use std::iter::Peekable;

use rules::{rules_for, FAMILY_ORDER};

type Matches<'d> = Box<dyn Iterator<Item = CandidateUrl> + 'd>;

/// Lazy candidate sequence for one document. Families are only evaluated when
/// the iterator is first advanced. Single pass.
pub struct Candidates<'d> {
    doc: &'d str,
    pending: std::slice::Iter<'static, Family>,
    active: Option<Peekable<Matches<'d>>>,
    family: Option<Family>,
}

impl<'d> Candidates<'d> {
    /// Family that produced the candidates, once one has matched.
    pub fn family(&self) -> Option<Family> {
        self.family
    }
}

impl Iterator for Candidates<'_> {
    type Item = CandidateUrl;

    fn next(&mut self) -> Option<CandidateUrl> {
        if let Some(active) = self.active.as_mut() {
            return active.next();
        }
        for &family in self.pending.by_ref() {
            let mut matches = family_matches(family, self.doc).peekable();
            if matches.peek().is_some() {
                tracing::debug!(family = %family, "extraction family matched");
                self.family = Some(family);
                return self.active.insert(matches).next();
            }
            tracing::trace!(family = %family, "extraction family yielded nothing");
        }
        None
    }
}

/// Candidate media URLs in `doc`, lazily.
pub fn candidates(doc: &str) -> Candidates<'_> {
    Candidates {
        doc,
        pending: FAMILY_ORDER.iter(),
        active: None,
        family: None,
    }
}

/// Eager result of running the chain over a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    /// Family that matched; `None` when nothing was found.
    pub family: Option<Family>,
    pub urls: Vec<CandidateUrl>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// Runs the whole chain over `doc` and collects the winning family's URLs.
pub fn extract(doc: &str) -> Extraction {
    let mut iter = candidates(doc);
    let urls: Vec<CandidateUrl> = iter.by_ref().collect();
    Extraction {
        family: iter.family(),
        urls,
    }
}

fn family_matches(family: Family, doc: &str) -> Matches<'_> {
    if family.is_structured() {
        Box::new(structured_matches(family, doc).into_iter())
    } else {
        Box::new(direct_matches(family, doc))
    }
}

/// Every marker hit for the family's rules, parsed and walked, merged in
/// document order.
fn structured_matches(family: Family, doc: &str) -> Vec<CandidateUrl> {
    let mut hits: Vec<(usize, Vec<CandidateUrl>)> = Vec::new();
    for rule in rules_for(family) {
        for caps in rule.pattern.captures_iter(doc) {
            let Some(payload) = rule.payload(&caps) else {
                continue;
            };
            let start = payload.start();
            match walk::parse_leading_value(&doc[start..]) {
                Some(value) => hits.push((start, urls_from_value(&value))),
                None => tracing::debug!(rule = rule.name, offset = start, "skipping unparsable block"),
            }
        }
    }
    hits.sort_by_key(|(offset, _)| *offset);
    hits.into_iter().flat_map(|(_, urls)| urls).collect()
}

fn direct_matches(family: Family, doc: &str) -> impl Iterator<Item = CandidateUrl> + '_ {
    rules_for(family)
        .flat_map(move |rule| {
            rule.pattern
                .captures_iter(doc)
                .filter_map(move |caps| rule.payload(&caps).map(|m| CandidateUrl::normalize(m.as_str())))
        })
        .filter(CandidateUrl::has_media_marker)
}
