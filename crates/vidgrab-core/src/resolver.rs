//! Resolver interface for turning higher-level inputs into a direct media URL.
//!
//! The downloader only sees `ResolvedMedia`; it does not know whether the URL
//! came from a live page, a saved HTML file or the detail API.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::VidgrabConfig;
use crate::cookies::CookieJar;
use crate::extractor::{self, CandidateUrl, Extraction, Family};
use crate::fetch::{self, RequestProfile};
use crate::probe;
use crate::url_model;

/// What the downloader needs for the media GET, plus what the
/// resolver saw on the way.
#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub url: String,
    /// Headers required to perform the media GET.
    pub headers: HashMap<String, String>,
    /// Every candidate found, in extraction order.
    pub candidates: Vec<CandidateUrl>,
    /// Extraction family that produced the candidates (`None` for API and
    /// already-direct inputs).
    pub family: Option<Family>,
    pub video_id: Option<String>,
}

/// Implemented by each input source (page, saved file, API).
pub trait Resolver {
    fn resolve(&self) -> Result<ResolvedMedia>;
}

/// Picks candidate `index`, failing when nothing was found or the index is
/// out of range.
pub fn select_candidate<'c>(
    candidates: &'c [CandidateUrl],
    index: usize,
    source: &str,
) -> Result<&'c CandidateUrl> {
    if candidates.is_empty() {
        anyhow::bail!("no video URL found in {source}");
    }
    candidates.get(index).with_context(|| {
        format!(
            "candidate index {index} out of range ({} found in {source})",
            candidates.len()
        )
    })
}

fn from_extraction(
    extraction: Extraction,
    index: usize,
    source: &str,
    cfg: &VidgrabConfig,
    video_id: Option<String>,
) -> Result<ResolvedMedia> {
    let url = select_candidate(&extraction.urls, index, source)?
        .as_str()
        .to_string();
    tracing::info!(
        "resolved {} via {} ({} candidates)",
        source,
        extraction.family.map(Family::label).unwrap_or("-"),
        extraction.urls.len()
    );
    Ok(ResolvedMedia {
        url,
        headers: RequestProfile::media_headers(cfg),
        candidates: extraction.urls,
        family: extraction.family,
        video_id,
    })
}

/// Fetches a share/page URL and extracts from the HTML.
pub struct PageResolver<'a> {
    pub page_url: &'a str,
    pub cfg: &'a VidgrabConfig,
    pub jar: &'a CookieJar,
    pub index: usize,
    /// Where to dump the fetched body for later `vidgrab search`.
    pub save_body: Option<&'a Path>,
}

impl Resolver for PageResolver<'_> {
    fn resolve(&self) -> Result<ResolvedMedia> {
        if url_model::is_direct_media_url(self.page_url) {
            let url = CandidateUrl::normalize(self.page_url);
            return Ok(ResolvedMedia {
                url: url.as_str().to_string(),
                headers: RequestProfile::media_headers(self.cfg),
                candidates: vec![url],
                family: None,
                video_id: None,
            });
        }

        let profile = RequestProfile::page(self.cfg, self.jar);
        let page = fetch::fetch(self.page_url, &profile)?.require_success()?;
        if let Some(path) = self.save_body {
            fs::write(path, &page.body)
                .with_context(|| format!("save response body to {}", path.display()))?;
            tracing::info!("saved response body to {}", path.display());
        }
        from_extraction(
            extractor::extract(&page.body),
            self.index,
            self.page_url,
            self.cfg,
            url_model::video_id_from_url(self.page_url),
        )
    }
}

/// Extracts from a previously saved page.
pub struct FileResolver<'a> {
    pub path: &'a Path,
    pub cfg: &'a VidgrabConfig,
    pub index: usize,
}

impl Resolver for FileResolver<'_> {
    fn resolve(&self) -> Result<ResolvedMedia> {
        let body = fs::read_to_string(self.path)
            .with_context(|| format!("read saved page {}", self.path.display()))?;
        let source = self.path.display().to_string();
        from_extraction(extractor::extract(&body), self.index, &source, self.cfg, None)
    }
}

/// Calls the JSON detail endpoint for a video id (or a page URL carrying one).
pub struct ApiResolver<'a> {
    pub input: &'a str,
    pub cfg: &'a VidgrabConfig,
    pub jar: &'a CookieJar,
    pub index: usize,
}

impl Resolver for ApiResolver<'_> {
    fn resolve(&self) -> Result<ResolvedMedia> {
        let video_id = url_model::video_id_from_input(self.input)
            .with_context(|| format!("no video id in {}", self.input))?;
        let api_url = url_model::api_detail_url(&self.cfg.api_detail_url, &video_id);
        let profile = RequestProfile::api(self.cfg, self.jar);
        let page = fetch::fetch(&api_url, &profile)?.require_success()?;
        let report = probe::inspect_api_body(&page.body);
        if let Err(e) = &report.parsed {
            anyhow::bail!("detail API returned invalid JSON: {e}");
        }
        let url = select_candidate(&report.urls, self.index, &api_url)?
            .as_str()
            .to_string();
        Ok(ResolvedMedia {
            url,
            headers: RequestProfile::media_headers(self.cfg),
            candidates: report.urls,
            family: None,
            video_id: Some(video_id),
        })
    }
}
