//! Depth-first walk over parsed page state looking for
//! `video.play_addr.url_list`.

use serde::Deserialize;
use serde_json::Value;

use super::CandidateUrl;

const VIDEO_KEY: &str = "video";
const PLAY_ADDR_KEY: &str = "play_addr";
const URL_LIST_KEY: &str = "url_list";

/// Parses the JSON value at the start of `text`, ignoring whatever follows it
/// (`;`, `</script>`, more script). Returns `None` if the value is truncated or
/// malformed.
pub(crate) fn parse_leading_value(text: &str) -> Option<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    match Value::deserialize(&mut de) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("structured block did not parse: {}", e);
            None
        }
    }
}

/// Collects every `url_list` string under a `video.play_addr` object, in
/// document order. Non-string entries are skipped.
pub fn urls_from_value(root: &Value) -> Vec<CandidateUrl> {
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

fn walk(node: &Value, out: &mut Vec<CandidateUrl>) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                if key == VIDEO_KEY {
                    collect_play_addr(value, out);
                }
                walk(value, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, out);
            }
        }
        _ => {}
    }
}

fn collect_play_addr(video: &Value, out: &mut Vec<CandidateUrl>) {
    let Some(list) = video
        .get(PLAY_ADDR_KEY)
        .and_then(|addr| addr.get(URL_LIST_KEY))
        .and_then(Value::as_array)
    else {
        return;
    };
    out.extend(
        list.iter()
            .filter_map(Value::as_str)
            .map(CandidateUrl::normalize),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_nested_video_in_key_order() {
        let v = json!({
            "first": { "video": { "play_addr": { "url_list": ["https://a.com/1.mp4"] } } },
            "list": [
                { "video": { "play_addr": { "url_list": ["https://a.com/2.mp4", 7, "//b.com/3.mp4"] } } }
            ]
        });
        let urls = urls_from_value(&v);
        assert_eq!(
            urls,
            vec![
                CandidateUrl::normalize("https://a.com/1.mp4"),
                CandidateUrl::normalize("https://a.com/2.mp4"),
                CandidateUrl::normalize("https://b.com/3.mp4"),
            ]
        );
    }

    #[test]
    fn video_without_play_addr_is_ignored() {
        let v = json!({ "video": { "cover": "x.jpg" }, "video_list": [] });
        assert!(urls_from_value(&v).is_empty());
        let v = json!({ "video": "not-an-object" });
        assert!(urls_from_value(&v).is_empty());
    }

    #[test]
    fn parse_leading_value_ignores_trailer() {
        let v = parse_leading_value(r#"{"a":1};window.x = 2;</script>"#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn parse_leading_value_truncated_is_none() {
        assert!(parse_leading_value(r#"{"a":{"b":"#).is_none());
        assert!(parse_leading_value("").is_none());
    }
}
