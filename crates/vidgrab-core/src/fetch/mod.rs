//! Blocking page / API fetch.
//!
//! One GET through a libcurl easy handle: follows redirects, decodes gzip/br,
//! buffers the whole body. Non-2xx responses are returned, not raised, so
//! probes can show what the server said; callers that need a success use
//! [`FetchedPage::require_success`].

mod parse;
mod profile;

pub(crate) use parse::parse_headers;
pub use parse::ResponseMeta;
pub use profile::RequestProfile;

use std::str;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// A fetched response with its body decoded as (lossy) UTF-8.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u32,
    pub body: String,
    pub meta: ResponseMeta,
    /// URL after redirects.
    pub effective_url: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn require_success(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Http {
                url: self.effective_url,
                status: self.status,
            })
        }
    }
}

/// Appends `profile`'s headers and cookies to `easy`.
pub(crate) fn apply_profile(
    easy: &mut curl::easy::Easy,
    profile: &RequestProfile,
) -> Result<(), curl::Error> {
    easy.useragent(&profile.user_agent)?;
    if let Some(cookie) = &profile.cookies {
        easy.cookie(cookie)?;
    }
    let mut list = curl::easy::List::new();
    for (k, v) in &profile.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !profile.headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(())
}

/// Performs a GET of `url` with `profile` and returns the full response.
pub fn fetch(url: &str, profile: &RequestProfile) -> Result<FetchedPage, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut header_lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(15))?;
    easy.timeout(profile.timeout)?;
    // Empty string = every encoding libcurl was built with.
    easy.accept_encoding("")?;
    apply_profile(&mut easy, profile)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let effective_url = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());
    tracing::info!(
        "GET {} -> HTTP {} ({} bytes)",
        effective_url,
        status,
        body.len()
    );

    Ok(FetchedPage {
        status,
        body: String::from_utf8_lossy(&body).into_owned(),
        meta: parse_headers(&header_lines),
        effective_url,
    })
}
