//! `vidgrab probe-api <url-or-id>` – call the detail endpoint and report.

use anyhow::{Context, Result};
use std::path::Path;
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::fetch::{self, RequestProfile};
use vidgrab_core::probe;
use vidgrab_core::url_model;

use super::cookie_jar;

pub fn run_probe_api(cfg: &VidgrabConfig, input: &str, cookies: Option<&Path>) -> Result<()> {
    let video_id = url_model::video_id_from_input(input)
        .with_context(|| format!("no video id in {}", input))?;
    let api_url = url_model::api_detail_url(&cfg.api_detail_url, &video_id);
    println!("Video id: {}", video_id);
    println!("API URL: {}", api_url);

    let jar = cookie_jar(cfg, cookies)?;
    let page = fetch::fetch(&api_url, &RequestProfile::api(cfg, &jar))?;
    println!("Status: {}", page.status);
    println!("--- first {} chars ---", probe::PREVIEW_CHARS);
    println!("{}", probe::preview(&page.body, probe::PREVIEW_CHARS));
    println!("---");

    let report = probe::inspect_api_body(&page.body);
    match &report.parsed {
        Err(e) => println!("Body is not valid JSON: {}", e),
        Ok(()) if !report.has_detail => println!("JSON parsed, but no aweme_detail"),
        Ok(()) => {
            println!("aweme_detail present, {} play URL(s):", report.urls.len());
            for (i, url) in report.urls.iter().enumerate() {
                println!("  [{}] {}", i, url);
            }
        }
    }
    Ok(())
}
