use std::{future::Future, path::Path};

use crate::llm::BackendError;

/// Speech-to-text unit processor: one call over one local audio artifact.
///
/// Implementations fix language and precision mode themselves; callers only
/// hand over a file. Blank output must surface as [`BackendError::Empty`].
pub trait Transcriber {
    fn transcribe(
        &self,
        audio: &Path,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Capability check, independent of any processing call.
    fn ensure_ready(&self) -> impl Future<Output = Result<(), BackendError>> + Send;
}
