mod chunk;
mod config;
mod error;
mod llm;
mod processor;
pub mod summarize;
pub mod tracing;
pub mod transcribe;
pub mod types;
pub mod yt;

pub use chunk::{plan_spans, ChunkDomain, Span};
pub use config::PipelineConfig;
pub use error::{Error, ErrorKind, Location, Phase, Stage};
pub use llm::{
    ollama::OllamaClient, whisper::WhisperClient, BackendError, Summarizer, Transcriber,
    TranscriptEnricher,
};
pub use processor::{builder::VideoProcessorBuilder, NoEnrichment, VideoProcessor};
