use std::future::Future;

use crate::llm::BackendError;

/// Generative-text unit processor: one prompt in, one completion out.
pub trait Summarizer {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Capability check, independent of any processing call.
    fn ensure_ready(&self) -> impl Future<Output = Result<(), BackendError>> + Send;
}

/// Optional post-transcription pass that attributes speakers. This is the one
/// place a degraded result is acceptable: callers fall back to the unlabeled
/// transcript when enrichment fails.
pub trait TranscriptEnricher {
    fn enrich(
        &self,
        transcript: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}
