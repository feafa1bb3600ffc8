//! Video id derivation from share URLs.

use crate::extractor::MEDIA_MARKER;

/// Video id from a share/page URL: the `modal_id` query parameter when present
/// (feed pages open videos in a modal), otherwise the last non-empty path
/// segment.
///
/// Returns `None` if the URL cannot be parsed or has no usable segment.
pub fn video_id_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "modal_id") {
        if !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

/// Accepts either a page URL or a bare alphanumeric id.
pub fn video_id_from_input(input: &str) -> Option<String> {
    let input = input.trim();
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(input.to_string());
    }
    video_id_from_url(input)
}

/// Fills `{id}` in the detail endpoint template.
pub fn api_detail_url(template: &str, video_id: &str) -> String {
    template.replace("{id}", video_id)
}

/// True if `url` already points at a media file (path ends in `.mp4`).
pub fn is_direct_media_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| u.path().to_ascii_lowercase().ends_with(MEDIA_MARKER))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_path() {
        assert_eq!(
            video_id_from_url("https://www.douyin.com/video/7307576758686739819").as_deref(),
            Some("7307576758686739819")
        );
        assert_eq!(
            video_id_from_url("https://www.douyin.com/video/7307576758686739819/?previous_page=app").as_deref(),
            Some("7307576758686739819")
        );
    }

    #[test]
    fn id_from_modal_query() {
        assert_eq!(
            video_id_from_url("https://www.douyin.com/discover?modal_id=123456").as_deref(),
            Some("123456")
        );
        assert_eq!(
            video_id_from_url("https://www.douyin.com/user/abc?modal_id=").as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn id_missing() {
        assert_eq!(video_id_from_url("https://www.douyin.com/"), None);
        assert_eq!(video_id_from_url("not a url"), None);
    }

    #[test]
    fn id_from_input_accepts_bare_id() {
        assert_eq!(video_id_from_input(" 731234 ").as_deref(), Some("731234"));
        assert_eq!(
            video_id_from_input("https://www.douyin.com/video/42").as_deref(),
            Some("42")
        );
        assert_eq!(video_id_from_input(""), None);
    }

    #[test]
    fn api_url_template() {
        assert_eq!(
            api_detail_url("https://h/detail/?aweme_id={id}", "77"),
            "https://h/detail/?aweme_id=77"
        );
    }

    #[test]
    fn direct_media_detection() {
        assert!(is_direct_media_url("https://cdn.example.com/a/b.mp4?sig=1"));
        assert!(is_direct_media_url("https://cdn.example.com/a/B.MP4"));
        assert!(!is_direct_media_url("https://www.douyin.com/video/42"));
        assert!(!is_direct_media_url("//cdn.example.com/b.mp4"));
    }
}
