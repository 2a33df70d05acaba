pub mod builder;

use std::{path::PathBuf, time::Instant};

use crate::{
    config::PipelineConfig,
    error::Error,
    llm::{BackendError, Summarizer, Transcriber, TranscriptEnricher},
    summarize::summarize_text,
    transcribe::transcribe_artifact,
    types::{word_count, Digest, SourceArtifact},
    yt::{ffmpeg::AudioCutter, AcquireError, AudioSource},
};

/// Placeholder enricher for the default, label-free pipeline. Never invoked;
/// it only anchors the builder's type parameter when no enricher is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl TranscriptEnricher for NoEnrichment {
    async fn enrich(&self, transcript: &str) -> Result<String, BackendError> {
        Ok(transcript.to_string())
    }
}

/// The end-to-end video digest processor: acquisition gate, transcription
/// pipeline, optional speaker labeling, summarization pipeline.
#[derive(Debug)]
pub struct VideoProcessor<A, T, S, C, E = NoEnrichment>
where
    A: AudioSource + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: AudioCutter + Send + Sync + 'static,
    E: TranscriptEnricher + Send + Sync + 'static,
{
    workdir: PathBuf,
    config: PipelineConfig,
    source: A,
    transcriber: T,
    summarizer: S,
    cutter: C,
    enricher: Option<E>,
}

impl<A, T, S, C, E> VideoProcessor<A, T, S, C, E>
where
    A: AudioSource + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: AudioCutter + Send + Sync + 'static,
    E: TranscriptEnricher + Send + Sync + 'static,
{
    /// Converts one video URL into a transcript and summary.
    ///
    /// Runs strictly sequentially: probe, duration gate, acquire, transcribe,
    /// optional enrichment, summarize. Any stage failure (except enrichment,
    /// which fails soft) aborts the run.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, url: &str) -> Result<Digest, Error> {
        let started = Instant::now();

        if crate::yt::parse_video_id(url).is_none() {
            return Err(Error::Acquisition(AcquireError::BadUrl(url.to_string())));
        }

        let meta = self.source.probe(url).await?;
        if meta.duration > self.config.max_video_duration {
            return Err(Error::LimitExceeded {
                duration: meta.duration,
                max: self.config.max_video_duration,
            });
        }
        tracing::info!(
            video_id = %meta.video_id,
            title = %meta.title,
            duration = meta.duration,
            "acquiring audio"
        );

        std::fs::create_dir_all(&self.workdir).map_err(AcquireError::Io)?;
        // single-slot artifact policy: drop whatever the previous run retained
        self.source.release_stale(&self.workdir, None);

        let path = self.source.acquire(url, &meta, &self.workdir).await?;
        let artifact = SourceArtifact {
            path,
            metadata: meta,
        };

        let transcript = transcribe_artifact(
            &self.transcriber,
            &self.cutter,
            &artifact,
            &self.config,
        )
        .await?;
        let transcript = self.apply_enrichment(transcript).await;

        let summary = summarize_text(&self.summarizer, &transcript, &self.config).await?;

        let digest = Digest {
            transcript_word_count: word_count(&transcript),
            summary_word_count: word_count(&summary),
            metadata: artifact.metadata,
            transcript,
            summary,
            processing_time: started.elapsed().as_secs_f64(),
        };
        tracing::info!(
            video_id = %digest.metadata.video_id,
            transcript_words = digest.transcript_word_count,
            summary_words = digest.summary_word_count,
            elapsed = digest.processing_time,
            "digest complete"
        );
        Ok(digest)
    }

    /// Speaker labeling is a best-effort decorator: a failure falls back to
    /// the unlabeled transcript instead of aborting the run.
    async fn apply_enrichment(&self, transcript: String) -> String {
        let Some(enricher) = &self.enricher else {
            return transcript;
        };
        match enricher.enrich(&transcript).await {
            Ok(labeled) if !labeled.trim().is_empty() => labeled,
            Ok(_) => {
                tracing::warn!("speaker labeling returned nothing, keeping plain transcript");
                transcript
            }
            Err(e) => {
                tracing::warn!(error = %e, "speaker labeling failed, keeping plain transcript");
                transcript
            }
        }
    }
}
