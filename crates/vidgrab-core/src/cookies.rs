//! Netscape `cookies.txt` loading.
//!
//! Browser-exported cookie files have one cookie per line, seven tab-separated
//! fields: domain, include-subdomains flag, path, secure, expiry, name, value.
//! Only name and value matter here; the jar is handed to the fetcher as a
//! single `Cookie` header.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Prefix some exporters put on HttpOnly cookies; such lines are not comments.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Cookie name → value. Later duplicates overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// `name=value; name2=value2`, or `None` for an empty jar.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        Some(parts.join("; "))
    }
}

/// Parses the contents of a Netscape cookie file.
pub fn parse_netscape_cookies(contents: &str) -> CookieJar {
    let mut jar = CookieJar::new();
    for line in contents.lines() {
        let line = line.trim();
        let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            tracing::debug!("skipping cookie line with {} fields", fields.len());
            continue;
        }
        jar.insert(fields[5], fields[6]);
    }
    jar
}

/// Loads a Netscape cookie file from disk.
pub fn load_netscape_cookies(path: &Path) -> Result<CookieJar> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read cookie file {}", path.display()))?;
    let jar = parse_netscape_cookies(&contents);
    tracing::info!("loaded {} cookies from {}", jar.len(), path.display());
    Ok(jar)
}

/// Loads the jar if a cookie file is configured, otherwise returns an empty jar.
pub fn load_optional(path: Option<&Path>) -> Result<CookieJar> {
    match path {
        Some(p) => load_netscape_cookies(p),
        None => Ok(CookieJar::new()),
    }
}
