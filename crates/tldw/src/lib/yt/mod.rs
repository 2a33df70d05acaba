pub mod ffmpeg;
pub mod ytdlp;

use std::{
    future::Future,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;

use crate::types::VideoMetadata;

/// Audio file extensions the single-slot cleanup will reclaim.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a"];

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("unrecognized video URL: {0}")]
    BadUrl(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{tool} exited with {status}: {stderr}")]
    Tool {
        tool: &'static str,
        status: i32,
        stderr: String,
    },
    #[error("probe output was not valid JSON: {0}")]
    Probe(#[from] serde_json::Error),
    #[error("expected output file missing: {}", .0.display())]
    MissingOutput(PathBuf),
    #[error("downloaded artifact implausibly small ({size} bytes): {}", .path.display())]
    ImplausiblySmall { path: PathBuf, size: u64 },
    #[error("downloaded artifact is not decodable: {0}")]
    Undecodable(String),
    #[error("all audio formats failed, last error: {0}")]
    FormatsExhausted(Box<AcquireError>),
}

/// The acquisition gate. Supplies metadata before committing to a download,
/// then a local audio artifact, and owns the single-slot artifact lifecycle.
pub trait AudioSource {
    /// Fetches metadata without downloading, so the duration ceiling can be
    /// enforced before any work begins.
    fn probe(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<VideoMetadata, AcquireError>> + Send;

    /// Downloads the audio for `meta` into `workdir` and returns its path.
    /// Tries the primary encoding first and falls back to the secondary one.
    fn acquire(
        &self,
        url: &str,
        meta: &VideoMetadata,
        workdir: &Path,
    ) -> impl Future<Output = Result<PathBuf, AcquireError>> + Send;

    /// Removes previously retained artifacts in `workdir`, except the one
    /// whose file stem matches `keep`. Failures are logged, never fatal.
    fn release_stale(&self, workdir: &Path, keep: Option<&str>);
}

/// Extracts the 11-character video id from the common YouTube URL shapes.
pub fn parse_video_id(url: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?:v=|youtu\.be/|shorts/|embed/|live/)([A-Za-z0-9_-]{11})")
            .expect("video id regex is valid")
    });
    re.captures(url).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_video_id;

    #[test]
    fn parses_watch_and_short_urls() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?start=10",
        ] {
            assert_eq!(parse_video_id(url).as_deref(), Some("dQw4w9WgXcQ"), "{url}");
        }
    }

    #[test]
    fn rejects_non_video_urls() {
        assert!(parse_video_id("https://example.com/watch").is_none());
        assert!(parse_video_id("not a url").is_none());
    }
}
