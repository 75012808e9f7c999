//! Resolution of a training video's media locator into a playback source.
//!
//! A locator is either a YouTube URL, which is turned into an embed URL, or a
//! path to an uploaded file, which must stay inside the upload directory.
//! Serving the file bytes is not handled here.

use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::CoreError;

/// Default directory (relative to the web root) holding uploaded videos.
pub const DEFAULT_UPLOAD_PREFIX: &str = "public/uploads/videos";

/// Base of every YouTube embed URL.
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

static YOUTUBE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/.+").expect("valid regex")
});

static YOUTUBE_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=))([^&?\n/]+)")
        .expect("valid regex")
});

/// Where the player should load a training video from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum VideoSource {
    Youtube { video_id: String, url: String },
    Local { path: String, content_type: &'static str },
}

/// Returns `true` if the locator points at YouTube.
pub fn is_youtube_url(url: &str) -> bool {
    YOUTUBE_URL_RE.is_match(url.trim())
}

/// Extract the YouTube video id from a watch, embed, `/v/`, or short URL.
pub fn youtube_video_id(url: &str) -> Option<String> {
    YOUTUBE_ID_RE
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Guess a video MIME type from the file extension. Unknown extensions are
/// served as MP4.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("webm") => "video/webm",
        Some("ogg") => "video/ogg",
        _ => "video/mp4",
    }
}

/// Resolve a locator into a [`VideoSource`].
///
/// - YouTube URLs without a recognisable video id fail with `Validation`.
/// - Local paths outside `upload_prefix`, or containing `..`, fail with
///   `Forbidden`.
pub fn resolve_video_source(url: &str, upload_prefix: &str) -> Result<VideoSource, CoreError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(CoreError::Validation("Video URL is required".to_string()));
    }

    if is_youtube_url(url) {
        let video_id = youtube_video_id(url)
            .ok_or_else(|| CoreError::Validation(format!("Invalid YouTube URL '{url}'")))?;
        return Ok(VideoSource::Youtube {
            url: format!("{YOUTUBE_EMBED_BASE}{video_id}"),
            video_id,
        });
    }

    let relative = url.trim_start_matches('/');
    let path = Path::new(relative);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes || !path.starts_with(upload_prefix.trim_matches('/')) {
        return Err(CoreError::Forbidden(format!(
            "Video path '{url}' is outside the upload directory"
        )));
    }

    Ok(VideoSource::Local {
        path: relative.to_string(),
        content_type: content_type_for(relative),
    })
}
