//! `vidgrab fetch <url>` – fetch a page, save the body, list candidates.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::extractor;
use vidgrab_core::fetch::{self, RequestProfile};

use super::{cookie_jar, print_extraction};

pub fn run_fetch(
    cfg: &VidgrabConfig,
    url: &str,
    cookies: Option<&Path>,
    save: &Path,
) -> Result<()> {
    let jar = cookie_jar(cfg, cookies)?;
    let page = fetch::fetch(url, &RequestProfile::page(cfg, &jar))?;
    println!("Status: {}", page.status);
    if page.effective_url != url {
        println!("Final URL: {}", page.effective_url);
    }
    if let Some(ct) = &page.meta.content_type {
        println!("Content-Type: {}", ct);
    }
    println!("Length: {} chars", page.body.chars().count());

    // Saved even on non-2xx: block pages are what we want to look at.
    fs::write(save, &page.body).with_context(|| format!("save body to {}", save.display()))?;
    println!("Saved response to {}", save.display());

    print_extraction(&extractor::extract(&page.body));
    Ok(())
}
