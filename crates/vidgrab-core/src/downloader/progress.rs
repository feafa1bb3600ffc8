//! Progress snapshot for a single download (bytes done, rate, ETA).

/// Snapshot passed to the progress callback after each chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Bytes written so far.
    pub bytes_done: u64,
    /// `Content-Length` of the final response, if the server sent one.
    pub total_bytes: Option<u64>,
    /// Seconds since the transfer started.
    pub elapsed_secs: f64,
}

impl DownloadProgress {
    /// Fraction complete in [0.0, 1.0]; `None` when the size is unknown.
    pub fn fraction(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(1.0),
            Some(total) => Some((self.bytes_done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }

    pub fn percent(&self) -> Option<f64> {
        self.fraction().map(|f| f * 100.0)
    }

    /// Average rate since start in bytes per second (0 if no time has passed).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if the size is unknown or rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total_bytes?.saturating_sub(self.bytes_done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.bytes_per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }
}
