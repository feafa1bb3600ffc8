//! `vidgrab probe-page <url>` – show what a page actually contains.

use anyhow::Result;
use std::path::Path;
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::fetch::{self, RequestProfile};
use vidgrab_core::probe;

use super::cookie_jar;

pub fn run_probe_page(cfg: &VidgrabConfig, url: &str, cookies: Option<&Path>) -> Result<()> {
    let jar = cookie_jar(cfg, cookies)?;
    if jar.is_empty() {
        println!("No cookies loaded; the site may serve a stripped page.");
    }
    let page = fetch::fetch(url, &RequestProfile::page(cfg, &jar))?;
    let diagnosis = probe::diagnose_page(&page.body);

    println!("Status: {}", page.status);
    println!("Length: {} chars", diagnosis.length);
    println!("--- first {} chars ---", probe::PREVIEW_CHARS);
    println!("{}", diagnosis.preview);
    println!("---");
    match diagnosis.marker {
        Some(marker) => println!("Diagnosis: {}", marker.describe()),
        None => println!("Diagnosis: no known markers"),
    }
    Ok(())
}
