//! Output filename derivation for downloaded videos.

use std::time::{SystemTime, UNIX_EPOCH};

/// Linux NAME_MAX minus room for the `.mp4` extension.
const MAX_STEM_BYTES: usize = 255 - 4;

/// Makes `raw` safe as a Linux filename stem.
///
/// Path separators, NUL, control characters and whitespace become `_`, runs of
/// `_` collapse to one, and leading/trailing dots and underscores are trimmed.
/// Non-ASCII text is kept. Capped at `MAX_STEM_BYTES` on a char boundary.
pub fn sanitize_stem(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        let unsafe_char = c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        let c = if unsafe_char { '_' } else { c };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches(|c| c == '_' || c == '.');
    let mut end = trimmed.len().min(MAX_STEM_BYTES);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}

/// Picks the local filename for a downloaded video.
///
/// 1. `<video_id>.mp4` when an id is known and survives sanitizing.
/// 2. The media URL's last path segment, if it already ends in `.mp4`.
/// 3. `video_<unix-seconds>.mp4`.
pub fn derive_video_filename(video_id: Option<&str>, media_url: &str, now: SystemTime) -> String {
    if let Some(stem) = video_id.map(sanitize_stem).filter(|s| !s.is_empty()) {
        return format!("{stem}.mp4");
    }

    let from_url = url::Url::parse(media_url).ok().and_then(|u| {
        u.path_segments()?
            .filter(|s| !s.is_empty())
            .last()
            .map(sanitize_stem)
    });
    if let Some(name) = from_url.filter(|n| n.to_ascii_lowercase().ends_with(".mp4") && n.len() > 4) {
        return name;
    }

    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("video_{secs}.mp4")
}
