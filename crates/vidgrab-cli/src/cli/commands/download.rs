//! `vidgrab download <url>` – resolve the media URL and download it.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};
use vidgrab_core::config::VidgrabConfig;
use vidgrab_core::downloader::{self, DownloadProgress};
use vidgrab_core::resolver::{ApiResolver, FileResolver, PageResolver, Resolver};
use vidgrab_core::url_model;

use super::cookie_jar;

const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

pub struct DownloadArgs<'a> {
    /// Page URL, direct `.mp4` URL, video id (with `--via-api`) or saved page.
    pub url: &'a str,
    pub cookies: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
    pub index: usize,
    pub via_api: bool,
}

fn format_progress(p: &DownloadProgress) -> String {
    let done_mib = p.bytes_done as f64 / 1_048_576.0;
    let rate_mib = p.bytes_per_sec() / 1_048_576.0;
    match (p.total_bytes, p.percent()) {
        (Some(total), Some(pct)) => {
            let eta = p
                .eta_secs()
                .map(|s| format!("{:.0}s", s))
                .unwrap_or_else(|| "?".to_string());
            format!(
                "\r  {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ETA {}  ",
                done_mib,
                total as f64 / 1_048_576.0,
                pct,
                rate_mib,
                eta
            )
        }
        _ => format!("\r  {:.1} MiB  {:.2} MiB/s  ", done_mib, rate_mib),
    }
}

/// Rate-limits progress rendering. Snapshots skipped by the throttle are held
/// so the last one can still be drawn when the transfer ends.
struct ProgressThrottle {
    interval: Duration,
    last_draw: Option<Instant>,
    held: Option<DownloadProgress>,
}

impl ProgressThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_draw: None,
            held: None,
        }
    }

    /// Returns the snapshot if it is due for drawing at `now`.
    fn offer(&mut self, p: &DownloadProgress, now: Instant) -> Option<DownloadProgress> {
        let due = self
            .last_draw
            .map_or(true, |t| now.duration_since(t) >= self.interval);
        if due || p.fraction() == Some(1.0) {
            self.last_draw = Some(now);
            self.held = None;
            Some(p.clone())
        } else {
            self.held = Some(p.clone());
            None
        }
    }

    /// The newest snapshot that was offered but not drawn.
    fn finish(&mut self) -> Option<DownloadProgress> {
        self.held.take()
    }
}

pub fn run_download(cfg: &VidgrabConfig, args: &DownloadArgs<'_>) -> Result<()> {
    let jar = cookie_jar(cfg, args.cookies)?;
    let local = Path::new(args.url);
    let resolver: Box<dyn Resolver + '_> = if args.via_api {
        Box::new(ApiResolver {
            input: args.url,
            cfg,
            jar: &jar,
            index: args.index,
        })
    } else if local.is_file() {
        Box::new(FileResolver {
            path: local,
            cfg,
            index: args.index,
        })
    } else {
        Box::new(PageResolver {
            page_url: args.url,
            cfg,
            jar: &jar,
            index: args.index,
            save_body: None,
        })
    };
    let media = resolver.resolve()?;
    if media.candidates.len() > 1 {
        println!(
            "Using candidate {} of {} (--index to choose another)",
            args.index,
            media.candidates.len()
        );
    }
    println!("Video URL: {}", media.url);

    let output_dir = args.output_dir.unwrap_or(&cfg.output_dir);
    let filename =
        url_model::derive_video_filename(media.video_id.as_deref(), &media.url, SystemTime::now());
    let dest = output_dir.join(filename);

    let mut throttle = ProgressThrottle::new(PROGRESS_INTERVAL);
    let written = downloader::download_to_file(
        &media.url,
        &media.headers,
        &dest,
        Duration::from_secs(cfg.download_timeout_secs),
        |p| {
            if let Some(p) = throttle.offer(p, Instant::now()) {
                eprint!("{}", format_progress(&p));
            }
        },
    );
    if let Some(p) = throttle.finish() {
        eprint!("{}", format_progress(&p));
    }
    eprintln!();
    let written = written.with_context(|| format!("download {}", media.url))?;

    println!("Saved {} bytes to {}", written, dest.display());
    Ok(())
}
