use std::path::PathBuf;

use crate::{
    config::PipelineConfig,
    llm::{Summarizer, Transcriber, TranscriptEnricher},
    processor::NoEnrichment,
    yt::{ffmpeg::AudioCutter, AudioSource},
    VideoProcessor,
};

pub struct VideoProcessorBuilder<A = (), T = (), S = (), C = (), E = NoEnrichment> {
    workdir: PathBuf,
    config: PipelineConfig,
    source: A,
    transcriber: T,
    summarizer: S,
    cutter: C,
    enricher: Option<E>,
}

impl VideoProcessorBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            config: PipelineConfig::default(),
            source: (),
            transcriber: (),
            summarizer: (),
            cutter: (),
            enricher: None,
        }
    }
}

impl<A, T, S, C, E> VideoProcessorBuilder<A, T, S, C, E> {
    pub fn source<A2: AudioSource + Send + Sync + 'static>(
        self,
        source: A2,
    ) -> VideoProcessorBuilder<A2, T, S, C, E> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            config: self.config,
            source,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            cutter: self.cutter,
            enricher: self.enricher,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> VideoProcessorBuilder<A, T2, S, C, E> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            config: self.config,
            source: self.source,
            transcriber,
            summarizer: self.summarizer,
            cutter: self.cutter,
            enricher: self.enricher,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> VideoProcessorBuilder<A, T, S2, C, E> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            config: self.config,
            source: self.source,
            transcriber: self.transcriber,
            summarizer,
            cutter: self.cutter,
            enricher: self.enricher,
        }
    }

    pub fn cutter<C2: AudioCutter + Send + Sync + 'static>(
        self,
        cutter: C2,
    ) -> VideoProcessorBuilder<A, T, S, C2, E> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            config: self.config,
            source: self.source,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            cutter,
            enricher: self.enricher,
        }
    }

    pub fn enricher<E2: TranscriptEnricher + Send + Sync + 'static>(
        self,
        enricher: E2,
    ) -> VideoProcessorBuilder<A, T, S, C, E2> {
        VideoProcessorBuilder {
            workdir: self.workdir,
            config: self.config,
            source: self.source,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            cutter: self.cutter,
            enricher: Some(enricher),
        }
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }
}

impl<A, T, S, C, E> VideoProcessorBuilder<A, T, S, C, E>
where
    A: AudioSource + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: AudioCutter + Send + Sync + 'static,
    E: TranscriptEnricher + Send + Sync + 'static,
{
    pub fn build(self) -> VideoProcessor<A, T, S, C, E> {
        VideoProcessor {
            workdir: self.workdir,
            config: self.config,
            source: self.source,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            cutter: self.cutter,
            enricher: self.enricher,
        }
    }
}
