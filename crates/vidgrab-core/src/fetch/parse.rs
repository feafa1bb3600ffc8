//! Parse HTTP response header lines into ResponseMeta.

/// Headers of interest from the final response of a (possibly redirected) request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Body size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
}

/// Parse collected header lines into ResponseMeta.
///
/// libcurl hands us the headers of every hop when following redirects; each
/// status line starts a new block, so only the last response is reported.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseMeta {
    let mut meta = ResponseMeta::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            meta = ResponseMeta::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                if let Ok(n) = value.parse::<u64>() {
                    meta.content_length = Some(n);
                }
            }
            if name.eq_ignore_ascii_case("content-type") {
                meta.content_type = Some(value.to_string());
            }
        }
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_content_length_and_type() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Content-Type: video/mp4",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert_eq!(r.content_type.as_deref(), Some("video/mp4"));
    }

    #[test]
    fn parse_headers_only_last_response_counts() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Content-Length: 0",
            "Location: https://cdn.example.com/v.mp4",
            "",
            "HTTP/1.1 200 OK",
            "Content-Type: video/mp4",
        ]));
        assert_eq!(r.content_length, None);
        assert_eq!(r.content_type.as_deref(), Some("video/mp4"));
    }

    #[test]
    fn parse_headers_bad_length_ignored() {
        let r = parse_headers(&lines(&["Content-Length: lots"]));
        assert_eq!(r.content_length, None);
    }

    #[test]
    fn parse_headers_case_insensitive_names() {
        let r = parse_headers(&lines(&["content-length: 7", "CONTENT-TYPE: text/html"]));
        assert_eq!(r.content_length, Some(7));
        assert_eq!(r.content_type.as_deref(), Some("text/html"));
    }
}
