//! Diagnostics over fetched pages and API bodies, for humans reading the CLI
//! output when the site changes its markup.

use serde_json::Value;

use crate::extractor::{urls_from_value, CandidateUrl};

/// Characters of body shown in previews.
pub const PREVIEW_CHARS: usize = 500;

const STATE_MARKER: &str = "window.__INITIAL_STATE__";
const AWEME_MARKER: &str = "aweme";
const DETAIL_KEY: &str = "aweme_detail";

/// First recognizable thing found in a page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    StructuredState,
    Aweme,
    /// The body mentions "error" (often a captcha or block page).
    ErrorText,
}

impl PageMarker {
    pub fn describe(self) -> &'static str {
        match self {
            PageMarker::StructuredState => "found __INITIAL_STATE__ data",
            PageMarker::Aweme => "found aweme data",
            PageMarker::ErrorText => "found error text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDiagnosis {
    /// Body length in characters.
    pub length: usize,
    pub preview: String,
    pub marker: Option<PageMarker>,
}

/// First `max_chars` characters of `body`.
pub fn preview(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}

pub fn diagnose_page(body: &str) -> PageDiagnosis {
    let marker = if body.contains(STATE_MARKER) {
        Some(PageMarker::StructuredState)
    } else if body.contains(AWEME_MARKER) {
        Some(PageMarker::Aweme)
    } else if body.to_lowercase().contains("error") {
        Some(PageMarker::ErrorText)
    } else {
        None
    };
    PageDiagnosis {
        length: body.chars().count(),
        preview: preview(body, PREVIEW_CHARS),
        marker,
    }
}

/// What the detail endpoint returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReport {
    /// `Err` holds the JSON parse error message.
    pub parsed: Result<(), String>,
    pub has_detail: bool,
    pub urls: Vec<CandidateUrl>,
}

/// Parses an API body and pulls `aweme_detail.video.play_addr.url_list`.
/// Invalid JSON is reported in `parsed`, not returned as an error.
pub fn inspect_api_body(body: &str) -> ApiReport {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("API body is not JSON: {}", e);
            return ApiReport {
                parsed: Err(e.to_string()),
                has_detail: false,
                urls: Vec::new(),
            };
        }
    };
    let detail = value.get(DETAIL_KEY).filter(|d| !d.is_null());
    ApiReport {
        parsed: Ok(()),
        has_detail: detail.is_some(),
        urls: detail.map(urls_from_value).unwrap_or_default(),
    }
}
