pub mod audio_source;
pub mod cutter;
pub mod enricher;
pub mod summarizer;
pub mod transcriber;
