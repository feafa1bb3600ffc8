//! CLI command handlers, one file per subcommand.

mod completions;
mod download;
mod fetch;
mod probe_api;
mod probe_page;
mod search;
mod upgrade_tool;

pub use completions::run_completions;
pub use download::{run_download, DownloadArgs};
pub use fetch::run_fetch;
pub use probe_api::run_probe_api;
pub use probe_page::run_probe_page;
pub use search::run_search;
pub use upgrade_tool::run_upgrade_tool;

use anyhow::Result;
use std::path::Path;
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::cookies::{self, CookieJar};
use vidgrab_core::extractor::Extraction;

/// `--cookies` wins over the configured cookie file; neither means no cookies.
fn cookie_jar(cfg: &VidgrabConfig, flag: Option<&Path>) -> Result<CookieJar> {
    cookies::load_optional(flag.or(cfg.cookie_file.as_deref()))
}

fn print_extraction(extraction: &Extraction) {
    match extraction.family {
        Some(family) => {
            println!("Found {} video URL(s) via {}:", extraction.urls.len(), family);
            for (i, url) in extraction.urls.iter().enumerate() {
                println!("  [{}] {}", i, url);
            }
        }
        None => println!("No video URLs found."),
    }
}
