//! Transcription pipeline: audio timeline chunking plus concatenation.
//!
//! Audio segments are contiguous and non-overlapping, so joining partial
//! transcripts with a single space reconstructs the full transcript without
//! duplication.

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{
    chunk::{self, ChunkDomain, Span},
    config::PipelineConfig,
    error::{Error, Stage},
    llm::{BackendError, Transcriber},
    types::SourceArtifact,
    yt::ffmpeg::AudioCutter,
};

/// Transcribes one acquired artifact, chunking by duration when it exceeds
/// the configured audio window.
pub async fn transcribe_artifact<T, C>(
    transcriber: &T,
    cutter: &C,
    artifact: &SourceArtifact,
    config: &PipelineConfig,
) -> Result<String, Error>
where
    T: Transcriber + Sync,
    C: AudioCutter + Sync,
{
    let domain = AudioDomain {
        transcriber,
        cutter,
        chunk_secs: config.audio_chunk_secs,
    };
    chunk::run(&domain, artifact).await
}

struct AudioDomain<'a, T, C> {
    transcriber: &'a T,
    cutter: &'a C,
    chunk_secs: u64,
}

impl<T, C> ChunkDomain for AudioDomain<'_, T, C>
where
    T: Transcriber + Sync,
    C: AudioCutter + Sync,
{
    type Input = SourceArtifact;

    const STAGE: Stage = Stage::Transcription;

    fn measure(&self, input: &SourceArtifact) -> u64 {
        input.metadata.duration
    }

    fn threshold(&self) -> u64 {
        self.chunk_secs
    }

    fn unit_size(&self) -> u64 {
        self.chunk_secs
    }

    fn overlap(&self) -> u64 {
        0
    }

    async fn process_whole(&self, input: &SourceArtifact) -> Result<String, BackendError> {
        self.transcriber.transcribe(&input.path).await
    }

    async fn process_span(
        &self,
        input: &SourceArtifact,
        span: Span,
    ) -> Result<String, BackendError> {
        let scratch = scratch_path(&input.path, span.ordinal());

        let result = match self
            .cutter
            .cut(&input.path, span.start, span.len(), &scratch)
            .await
        {
            Ok(()) => self.transcriber.transcribe(&scratch).await,
            Err(e) => Err(e),
        };

        // scratch clips never outlive the call that created them; cleanup
        // failures are logged but never mask the primary outcome
        match tokio::fs::remove_file(&scratch).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %scratch.display(), "failed to remove scratch clip")
            }
        }

        result
    }

    async fn combine(&self, partials: Vec<String>) -> Result<String, BackendError> {
        Ok(partials.iter().join(" "))
    }
}

fn scratch_path(artifact: &Path, ordinal: usize) -> PathBuf {
    let stem = artifact
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("artifact");
    let ext = artifact
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("mp3");
    artifact.with_file_name(format!("{stem}_part{ordinal:03}.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::scratch_path;
    use std::path::{Path, PathBuf};

    #[test]
    fn scratch_clips_sit_next_to_the_artifact() {
        assert_eq!(
            scratch_path(Path::new("/tmp/tldw/abc123.mp3"), 2),
            PathBuf::from("/tmp/tldw/abc123_part002.mp3")
        );
        assert_eq!(
            scratch_path(Path::new("/tmp/tldw/abc123.m4a"), 11),
            PathBuf::from("/tmp/tldw/abc123_part011.m4a")
        );
    }
}
