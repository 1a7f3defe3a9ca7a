//! YouTube URL recognition.
//!
//! A submission is only accepted when an 11-character video id can be
//! extracted from the URL. The recogniser covers the `watch?v=`,
//! `youtu.be/`, `embed/`, `v/` and `e/` forms.

use std::sync::OnceLock;

use regex::Regex;

static VIDEO_ID: OnceLock<Regex> = OnceLock::new();

fn video_id_pattern() -> &'static Regex {
    VIDEO_ID.get_or_init(|| {
        Regex::new(
            r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
        )
        .expect("video id pattern is valid")
    })
}

/// Extract the 11-character video id from a YouTube URL, if present.
pub fn extract_video_id(url: &str) -> Option<&str> {
    video_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Temporary job title used until the backend fills in the real one.
pub fn placeholder_title(video_id: &str) -> String {
    format!("Video {video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_from_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_with_extra_query_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?t=42&v=dQw4w9WgXcQ&list=x"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_non_video_urls() {
        assert_eq!(extract_video_id("https://example.com/watch?v=abc"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("not a url"), None);
        // Too short to be a video id.
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn placeholder_title_embeds_the_id() {
        assert_eq!(placeholder_title("dQw4w9WgXcQ"), "Video dQw4w9WgXcQ");
    }
}
