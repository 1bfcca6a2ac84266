//! YouTube URL helpers.

use std::sync::LazyLock;

use regex::Regex;

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|youtube\.com(?:/embed/|/v/|/watch\?v=|/watch\?.+&v=))([\w-]{11})")
        .expect("valid regex")
});

/// Extract the 11-character video id from a watch, short, embed or `/v/` URL.
pub fn video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Medium-quality preview image for a YouTube URL.
pub fn thumbnail_url(url: &str) -> Option<String> {
    video_id(url).map(|id| format!("https://img.youtube.com/vi/{id}/mqdefault.jpg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_common_url_shapes() {
        for url in [
            "https://www.youtube.com/watch?v=6mRbDEtDoyA",
            "https://youtu.be/6mRbDEtDoyA",
            "https://www.youtube.com/embed/6mRbDEtDoyA",
            "https://www.youtube.com/v/6mRbDEtDoyA",
            "https://www.youtube.com/watch?feature=share&v=6mRbDEtDoyA",
        ] {
            assert_eq!(video_id(url), Some("6mRbDEtDoyA"), "{url}");
        }
    }

    #[test]
    fn builds_thumbnail_url() {
        assert_eq!(
            thumbnail_url("https://www.youtube.com/watch?v=73_3icYYnT8").as_deref(),
            Some("https://img.youtube.com/vi/73_3icYYnT8/mqdefault.jpg")
        );
    }

    #[test]
    fn other_hosts_have_no_thumbnail() {
        assert_eq!(thumbnail_url("https://vimeo.com/123456789"), None);
    }
}
