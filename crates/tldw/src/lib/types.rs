use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Descriptive metadata for an acquired video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    /// Duration in seconds.
    pub duration: u64,
    pub channel: String,
    pub video_id: String,
    pub url: String,
}

/// A downloaded audio artifact. At most one is retained on disk at a time;
/// the previous one is released before the next acquisition.
#[derive(Debug, Clone)]
pub struct SourceArtifact {
    pub path: PathBuf,
    pub metadata: VideoMetadata,
}

/// Caller-facing result of one run.
#[derive(Debug, Serialize)]
pub struct Digest {
    pub metadata: VideoMetadata,
    pub transcript: String,
    pub summary: String,
    /// Wall-clock seconds spent end-to-end.
    pub processing_time: f64,
    pub transcript_word_count: usize,
    pub summary_word_count: usize,
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
