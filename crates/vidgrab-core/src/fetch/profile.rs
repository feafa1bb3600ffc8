//! Request header sets for page, API and media requests.

use std::collections::HashMap;
use std::time::Duration;

use crate::config::VidgrabConfig;
use crate::cookies::CookieJar;

const PAGE_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const API_ACCEPT: &str = "application/json, text/plain, */*";

/// Everything a fetch needs besides the URL.
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub user_agent: String,
    /// Extra headers, sent in order.
    pub headers: Vec<(String, String)>,
    /// Rendered `Cookie` header value, if any.
    pub cookies: Option<String>,
    pub timeout: Duration,
}

impl RequestProfile {
    fn base(cfg: &VidgrabConfig, jar: &CookieJar, timeout_secs: u64) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            headers: vec![
                ("Referer".to_string(), cfg.referer.clone()),
                ("Accept-Language".to_string(), cfg.accept_language.clone()),
                ("DNT".to_string(), "1".to_string()),
            ],
            cookies: jar.header_value(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Browser-like HTML page request.
    pub fn page(cfg: &VidgrabConfig, jar: &CookieJar) -> Self {
        let mut p = Self::base(cfg, jar, cfg.timeout_secs);
        p.headers.push(("Accept".to_string(), PAGE_ACCEPT.to_string()));
        p.headers
            .push(("Upgrade-Insecure-Requests".to_string(), "1".to_string()));
        p
    }

    /// JSON API request.
    pub fn api(cfg: &VidgrabConfig, jar: &CookieJar) -> Self {
        let mut p = Self::base(cfg, jar, cfg.timeout_secs);
        p.headers.push(("Accept".to_string(), API_ACCEPT.to_string()));
        p.headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        p
    }

    /// Headers handed to the downloader for the media GET: User-Agent and
    /// Referer only, the CDN rejects neither.
    pub fn media_headers(cfg: &VidgrabConfig) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), cfg.user_agent.clone());
        headers.insert("Referer".to_string(), cfg.referer.clone());
        headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_profile_headers() {
        let cfg = VidgrabConfig::default();
        let mut jar = CookieJar::new();
        jar.insert("ttwid", "abc");
        let p = RequestProfile::page(&cfg, &jar);
        assert_eq!(p.header("referer"), Some(cfg.referer.as_str()));
        assert!(p.header("Accept").unwrap().starts_with("text/html"));
        assert_eq!(p.cookies.as_deref(), Some("ttwid=abc"));
        assert_eq!(p.timeout, Duration::from_secs(cfg.timeout_secs));
    }

    #[test]
    fn api_profile_headers() {
        let cfg = VidgrabConfig::default();
        let p = RequestProfile::api(&cfg, &CookieJar::new());
        assert_eq!(p.header("Accept"), Some(API_ACCEPT));
        assert_eq!(p.header("Content-Type"), Some("application/json"));
        assert!(p.cookies.is_none());
    }

    #[test]
    fn media_headers_minimal() {
        let cfg = VidgrabConfig::default();
        let h = RequestProfile::media_headers(&cfg);
        assert_eq!(h.len(), 2);
        assert_eq!(h.get("Referer"), Some(&cfg.referer));
    }
}
