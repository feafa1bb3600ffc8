//! Single-stream media download.
//!
//! Streams one GET body into `<dest>.part`, reporting progress per chunk, and
//! renames it to `dest` once the transfer is complete. A failed or short
//! transfer removes the part file.

mod progress;

pub use progress::DownloadProgress;

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::fetch::{parse_headers, FetchError};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The server closed early: fewer bytes than its `Content-Length`.
    #[error("partial transfer: wrote {received} of {expected} bytes")]
    PartialTransfer { expected: u64, received: u64 },
}

impl From<curl::Error> for DownloadError {
    fn from(e: curl::Error) -> Self {
        DownloadError::Fetch(FetchError::Curl(e))
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> DownloadError + '_ {
    move |source| DownloadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// `<dest>.part`, next to the final file.
pub fn part_path(dest: &Path) -> PathBuf {
    let mut s: OsString = dest.as_os_str().to_owned();
    s.push(".part");
    PathBuf::from(s)
}

/// Downloads `url` to `dest` with a single GET. Returns the number of bytes
/// written. `on_progress` runs after every chunk and once more at the end.
pub fn download_to_file<F>(
    url: &str,
    custom_headers: &HashMap<String, String>,
    dest: &Path,
    timeout: Duration,
    mut on_progress: F,
) -> Result<u64, DownloadError>
where
    F: FnMut(&DownloadProgress),
{
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let part = part_path(dest);

    let result = stream_body(url, custom_headers, &part, timeout, &mut on_progress)
        .and_then(|written| {
            fs::rename(&part, dest).map_err(io_err(dest))?;
            Ok(written)
        });

    match &result {
        Ok(written) => tracing::info!("downloaded {} bytes to {}", written, dest.display()),
        Err(e) => {
            tracing::warn!("download of {} failed: {}", url, e);
            let _ = fs::remove_file(&part);
        }
    }
    result
}

fn stream_body(
    url: &str,
    custom_headers: &HashMap<String, String>,
    part: &Path,
    timeout: Duration,
    on_progress: &mut dyn FnMut(&DownloadProgress),
) -> Result<u64, DownloadError> {
    let mut file = File::create(part).map_err(io_err(part))?;
    let started = Instant::now();
    let header_lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
    let mut total: Option<Option<u64>> = None;
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    for (k, v) in custom_headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.borrow_mut().push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            // Headers of the final response are complete once its body starts.
            let total_bytes =
                *total.get_or_insert_with(|| parse_headers(&header_lines.borrow()).content_length);
            if let Err(e) = file.write_all(data) {
                write_error = Some(e);
                return Ok(0); // abort transfer
            }
            written += data.len() as u64;
            on_progress(&DownloadProgress {
                bytes_done: written,
                total_bytes,
                elapsed_secs: started.elapsed().as_secs_f64(),
            });
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if let Some(e) = write_error.take() {
        return Err(io_err(part)(e));
    }
    performed?;

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
        }
        .into());
    }

    file.flush().map_err(io_err(part))?;
    file.sync_all().map_err(io_err(part))?;

    let total_bytes = total.unwrap_or_else(|| parse_headers(&header_lines.borrow()).content_length);
    if let Some(expected) = total_bytes {
        if written != expected {
            return Err(DownloadError::PartialTransfer {
                expected,
                received: written,
            });
        }
    }

    on_progress(&DownloadProgress {
        bytes_done: written,
        total_bytes,
        elapsed_secs: started.elapsed().as_secs_f64(),
    });
    Ok(written)
}
