//! Recipe media helpers
//!
//! Recipes carry a free-form video URL and an image URL. Playback itself is
//! left to the YouTube embed; this module only extracts what the detail
//! screen needs to decide whether to show a player or a placeholder.

use regex::Regex;
use std::sync::OnceLock;

/// Length of a YouTube video id
pub const YOUTUBE_ID_LEN: usize = 11;

/// Extract the video id from a YouTube URL
///
/// Accepts `youtu.be/ID`, `v/ID`, `u/x/ID`, `embed/ID`, `watch?v=ID` and
/// `&v=ID` forms. Returns `None` unless the id is exactly 11 characters.
pub fn youtube_video_id(url: &str) -> Option<String> {
    static YOUTUBE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = YOUTUBE_REGEX.get_or_init(|| {
        Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
            .expect("static regex")
    });

    let id = re.captures(url)?.get(2)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then(|| id.to_string())
}

/// Embed URL for inline playback
pub fn youtube_embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?playsinline=1&rel=0", video_id)
}

/// Embed URL for a recipe's video field, if it holds a usable link
pub fn video_embed_for(video_url: Option<&str>) -> Option<String> {
    video_url
        .and_then(youtube_video_id)
        .map(|id| youtube_embed_url(&id))
}

/// Where a recipe image should be loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote http(s) image
    Remote(String),
    /// Bundled placeholder
    Placeholder,
}

impl ImageSource {
    /// Classify an image URL
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.starts_with("https://") || url.starts_with("http://") {
            ImageSource::Remote(url.to_string())
        } else {
            ImageSource::Placeholder
        }
    }

    /// Check if the placeholder should be shown
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder)
    }
}
