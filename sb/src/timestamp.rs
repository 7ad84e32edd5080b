//! Parse shared text as a YouTube link with a timestamp
//!
//! This is what the consumer does with a share once the bridge delivers it:
//! find the first URL, make sure it points at a YouTube video and pull the
//! `t` parameter out as seconds.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be", "www.youtu.be"];

/// Characters left as-is in a query component: `A-Za-z0-9-_.!~*'()`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

static URL_IN_TEXT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid regex"));
static URL_TRAILING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[),.;!?]+$").expect("valid regex"));
static HMS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("valid regex"));

/// Why shared text could not be turned into a timestamped link
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareParseError {
    #[error("Nothing was shared")]
    Empty,

    #[error("No URL could be found in shared text")]
    NoUrl,

    #[error("The shared text does not contain a valid URL: {source_url}")]
    InvalidUrl { source_url: String },

    #[error("Only YouTube watch links are supported: {source_url}")]
    NotYoutube { source_url: String },

    #[error("YouTube Shorts links are not supported: {source_url}")]
    UnsupportedShorts { source_url: String },

    #[error("The shared URL is missing the timestamp parameter `t`: {source_url}")]
    MissingTimestamp { source_url: String, video_id: String },

    #[error("The timestamp format is invalid: {token}")]
    InvalidTimestamp { source_url: String, token: String },
}

impl ShareParseError {
    /// Stable code for display and telemetry
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty | Self::NoUrl => "NO_URL",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::NotYoutube { .. } => "NOT_YOUTUBE",
            Self::UnsupportedShorts { .. } => "UNSUPPORTED_SHORTS",
            Self::MissingTimestamp { .. } => "MISSING_TIMESTAMP",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
        }
    }

    /// Video id, when the link got far enough to have one
    pub fn video_id(&self) -> Option<&str> {
        match self {
            Self::MissingTimestamp { video_id, .. } => Some(video_id),
            _ => None,
        }
    }
}

/// A YouTube video position extracted from shared text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampLink {
    pub video_id: String,
    pub raw_seconds: u64,
    pub formatted_time: String,
    pub source_url: String,
    pub canonical_watch_url: String,
}

/// Parse shared text into a timestamped YouTube link
pub fn parse_shared_text(text: &str) -> Result<TimestampLink, ShareParseError> {
    debug!(len = text.len(), "parse_shared_text: called");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ShareParseError::Empty);
    }

    let url_text = first_url(trimmed).ok_or(ShareParseError::NoUrl)?;
    parse_url(&url_text)
}

/// `m:ss`, or `h:mm:ss` from one hour up
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Canonical watch URL for a video at a position
pub fn build_watch_url(video_id: &str, seconds: u64) -> String {
    let encoded = utf8_percent_encode(video_id, COMPONENT);
    format!("https://www.youtube.com/watch?v={}&t={}s", encoded, seconds)
}

fn first_url(trimmed: &str) -> Option<String> {
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(trimmed.to_string());
    }

    let found = URL_IN_TEXT.find(trimmed)?;
    Some(URL_TRAILING_PUNCT.replace(found.as_str(), "").into_owned())
}

enum VideoRef {
    Id(String),
    Shorts,
    Unsupported,
}

fn video_ref(url: &Url) -> VideoRef {
    let Some(host) = url.host_str().map(str::to_ascii_lowercase) else {
        return VideoRef::Unsupported;
    };
    if !YOUTUBE_HOSTS.contains(&host.as_str()) {
        return VideoRef::Unsupported;
    }

    let path = url.path();
    let mut segments = path.split('/').filter(|s| !s.is_empty());

    let id = if host == "youtu.be" || host == "www.youtu.be" {
        segments.next().map(str::to_string)
    } else if path.starts_with("/shorts/") {
        return VideoRef::Shorts;
    } else if path == "/watch" {
        query_param(url, "v")
    } else if path.starts_with("/live/") {
        segments.nth(1).map(str::to_string)
    } else {
        None
    };

    match id {
        Some(id) if !id.is_empty() => VideoRef::Id(id),
        _ => VideoRef::Unsupported,
    }
}

fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn parse_url(url_text: &str) -> Result<TimestampLink, ShareParseError> {
    let source_url = url_text.to_string();
    let url = Url::parse(url_text).map_err(|_| ShareParseError::InvalidUrl {
        source_url: source_url.clone(),
    })?;

    let video_id = match video_ref(&url) {
        VideoRef::Id(id) => id,
        VideoRef::Shorts => return Err(ShareParseError::UnsupportedShorts { source_url }),
        VideoRef::Unsupported => return Err(ShareParseError::NotYoutube { source_url }),
    };

    let Some(token) = query_param(&url, "t").filter(|t| !t.is_empty()) else {
        return Err(ShareParseError::MissingTimestamp { source_url, video_id });
    };

    let Some(raw_seconds) = parse_timestamp_token(&token) else {
        return Err(ShareParseError::InvalidTimestamp { source_url, token });
    };

    debug!(%video_id, raw_seconds, "parse_url: parsed timestamp link");
    Ok(TimestampLink {
        canonical_watch_url: build_watch_url(&video_id, raw_seconds),
        formatted_time: format_time(raw_seconds),
        video_id,
        raw_seconds,
        source_url,
    })
}

/// Digit run as seconds, saturating at `u64::MAX`
fn saturating_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Accepts `90`, `90s` and `1h2m3s` style tokens
///
/// Oversized values saturate rather than fail.
fn parse_timestamp_token(token: &str) -> Option<u64> {
    let normalized = token.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Some(saturating_number(&normalized));
    }

    let caps = HMS_TOKEN.captures(&normalized)?;
    if caps.iter().skip(1).all(|c| c.is_none()) {
        return None;
    }

    let part = |idx: usize| caps.get(idx).map_or(0, |m| saturating_number(m.as_str()));

    let total = part(1)
        .saturating_mul(3600)
        .saturating_add(part(2).saturating_mul(60))
        .saturating_add(part(3));
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtu_be_with_seconds() {
        let link = parse_shared_text("https://youtu.be/abc123?t=342").unwrap();
        assert_eq!(link.video_id, "abc123");
        assert_eq!(link.raw_seconds, 342);
        assert_eq!(link.formatted_time, "5:42");
        assert_eq!(link.canonical_watch_url, "https://www.youtube.com/watch?v=abc123&t=342s");
    }

    #[test]
    fn test_watch_link_with_minutes_seconds() {
        let link = parse_shared_text("https://www.youtube.com/watch?v=abc123&t=5m42s").unwrap();
        assert_eq!(link.video_id, "abc123");
        assert_eq!(link.raw_seconds, 342);
    }

    #[test]
    fn test_embedded_url_in_text() {
        let link = parse_shared_text("Watch this now https://www.youtube.com/watch?v=abc123&t=1h2m3s thanks").unwrap();
        assert_eq!(link.raw_seconds, 3723);
        assert_eq!(link.formatted_time, "1:02:03");
        assert_eq!(link.source_url, "https://www.youtube.com/watch?v=abc123&t=1h2m3s");
    }

    #[test]
    fn test_embedded_url_trailing_punctuation_stripped() {
        let link = parse_shared_text("look (https://youtu.be/xyz?t=10s).").unwrap();
        assert_eq!(link.video_id, "xyz");
        assert_eq!(link.raw_seconds, 10);
    }

    #[test]
    fn test_live_and_mobile_hosts() {
        let live = parse_shared_text("https://www.youtube.com/live/liveid?t=60").unwrap();
        assert_eq!(live.video_id, "liveid");

        let mobile = parse_shared_text("https://m.youtube.com/watch?v=mob&t=2m").unwrap();
        assert_eq!(mobile.raw_seconds, 120);
    }

    #[test]
    fn test_missing_timestamp_keeps_video_id() {
        let err = parse_shared_text("https://www.youtube.com/watch?v=abc123").unwrap_err();
        assert_eq!(err.code(), "MISSING_TIMESTAMP");
        assert_eq!(err.video_id(), Some("abc123"));
    }

    #[test]
    fn test_shorts_unsupported() {
        let err = parse_shared_text("https://www.youtube.com/shorts/abc123?t=22").unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_SHORTS");
    }

    #[test]
    fn test_failure_codes() {
        assert_eq!(parse_shared_text("   ").unwrap_err().code(), "NO_URL");
        assert_eq!(parse_shared_text("no link here").unwrap_err().code(), "NO_URL");
        assert_eq!(parse_shared_text("https://").unwrap_err().code(), "INVALID_URL");
        assert_eq!(
            parse_shared_text("https://vimeo.com/123?t=4").unwrap_err().code(),
            "NOT_YOUTUBE"
        );
        assert_eq!(
            parse_shared_text("https://www.youtube.com/channel/abc?t=4").unwrap_err().code(),
            "NOT_YOUTUBE"
        );
        assert_eq!(
            parse_shared_text("https://youtu.be/abc?t=soon").unwrap_err().code(),
            "INVALID_TIMESTAMP"
        );
    }

    #[test]
    fn test_timestamp_tokens() {
        assert_eq!(parse_timestamp_token("0"), Some(0));
        assert_eq!(parse_timestamp_token("75s"), Some(75));
        assert_eq!(parse_timestamp_token("1H30M"), Some(5400));
        assert_eq!(parse_timestamp_token("2h5s"), Some(7205));
        assert_eq!(parse_timestamp_token(""), None);
        assert_eq!(parse_timestamp_token("s"), None);
        assert_eq!(parse_timestamp_token("1m2h"), None);
    }

    #[test]
    fn test_oversized_timestamp_saturates() {
        assert_eq!(parse_timestamp_token("99999999999999999999"), Some(u64::MAX));
        assert_eq!(parse_timestamp_token("99999999999999999999h"), Some(u64::MAX));

        let link = parse_shared_text("https://youtu.be/abc?t=99999999999999999999").unwrap();
        assert_eq!(link.raw_seconds, u64::MAX);
        assert!(link.canonical_watch_url.ends_with(&format!("&t={}s", u64::MAX)));
    }

    #[test]
    fn test_watch_url_encodes_like_uri_component() {
        let link = parse_shared_text("https://www.youtube.com/watch?v=a%20b~c&t=5").unwrap();
        assert_eq!(link.video_id, "a b~c");
        assert_eq!(link.canonical_watch_url, "https://www.youtube.com/watch?v=a%20b~c&t=5s");

        assert_eq!(
            build_watch_url("x-_.!~*'()", 1),
            "https://www.youtube.com/watch?v=x-_.!~*'()&t=1s"
        );
        assert_eq!(build_watch_url("a&b=c/é+", 1), "https://www.youtube.com/watch?v=a%26b%3Dc%2F%C3%A9%2B&t=1s");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(342), "5:42");
        assert_eq!(format_time(3600), "1:00:00");
    }

    #[test]
    fn test_error_messages_carry_url() {
        let err = parse_shared_text("https://vimeo.com/1").unwrap_err();
        assert!(err.to_string().contains("vimeo.com"));
    }
}
