use std::time::Duration;

/// Tunables for one end-to-end run. Built once (typically from CLI/env
/// defaults) and threaded through every component at construction time.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Hard ceiling on source duration, enforced before download.
    pub max_video_duration: u64,
    /// Audio segment length in seconds; also the threshold above which the
    /// transcription pipeline chunks.
    pub audio_chunk_secs: u64,
    /// Words per summarization segment.
    pub summary_chunk_words: u64,
    /// Word overlap carried across adjacent summarization segments.
    pub summary_overlap_words: u64,
    /// Word count above which the summarization pipeline chunks.
    pub summary_chunk_threshold: u64,
    /// Target length of the final summary, in words.
    pub max_summary_words: u64,
    /// Per backend call timeout. Model inference is slow; keep this generous.
    pub request_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            max_video_duration: 7200,
            audio_chunk_secs: 1800,
            summary_chunk_words: 2000,
            summary_overlap_words: 100,
            summary_chunk_threshold: 3000,
            max_summary_words: 500,
            request_timeout: Duration::from_secs(300),
        }
    }
}
