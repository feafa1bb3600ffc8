//! CLI for vidgrab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use vidgrab_core::config;

use commands::{
    run_completions, run_download, run_fetch, run_probe_api, run_probe_page, run_search,
    run_upgrade_tool, DownloadArgs,
};

/// File `fetch` saves the response body to unless `--save` is given.
pub const DEFAULT_SAVE_PATH: &str = "vidgrab_response.html";

/// Top-level CLI for vidgrab.
#[derive(Debug, Parser)]
#[command(name = "vidgrab")]
#[command(about = "vidgrab: find and download the video behind a share page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a page, save its body, and list the video URLs found in it.
    Fetch {
        /// Page URL.
        url: String,
        /// Netscape cookies.txt (overrides config).
        #[arg(long, value_name = "FILE")]
        cookies: Option<PathBuf>,
        /// Where to save the response body.
        #[arg(long, value_name = "PATH", default_value = DEFAULT_SAVE_PATH)]
        save: PathBuf,
    },

    /// Search a saved HTML file for video URLs.
    Search {
        /// Saved page.
        file: PathBuf,
        /// Also list the extraction rules, in the order they are tried.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fetch a page and show what it contains (status, preview, markers).
    ProbePage {
        url: String,
        #[arg(long, value_name = "FILE")]
        cookies: Option<PathBuf>,
    },

    /// Call the detail API for a video id or page URL and show the result.
    ProbeApi {
        /// Video id, or a page URL carrying one.
        input: String,
        #[arg(long, value_name = "FILE")]
        cookies: Option<PathBuf>,
    },

    /// Resolve the video behind a page (or a direct .mp4 URL) and download it.
    Download {
        url: String,
        #[arg(long, value_name = "FILE")]
        cookies: Option<PathBuf>,
        /// Directory to save into (overrides config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Which candidate to download, 0-based.
        #[arg(long, default_value = "0", value_name = "N")]
        index: usize,
        /// Resolve through the detail API instead of the page HTML.
        #[arg(long)]
        via_api: bool,
    },

    /// Upgrade the external downloader (yt-dlp) via pip.
    UpgradeTool,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch { url, cookies, save } => {
                run_fetch(&cfg, &url, cookies.as_deref(), &save)?
            }
            CliCommand::Search { file, verbose } => run_search(&file, verbose)?,
            CliCommand::ProbePage { url, cookies } => {
                run_probe_page(&cfg, &url, cookies.as_deref())?
            }
            CliCommand::ProbeApi { input, cookies } => {
                run_probe_api(&cfg, &input, cookies.as_deref())?
            }
            CliCommand::Download {
                url,
                cookies,
                output_dir,
                index,
                via_api,
            } => run_download(
                &cfg,
                &DownloadArgs {
                    url: &url,
                    cookies: cookies.as_deref(),
                    output_dir: output_dir.as_deref(),
                    index,
                    via_api,
                },
            )?,
            CliCommand::UpgradeTool => run_upgrade_tool(&cfg)?,
            CliCommand::Completions { shell } => run_completions(shell)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
