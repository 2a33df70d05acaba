//! Summarization pipeline: word-based chunking plus a synthesis pass.
//!
//! Long transcripts are split into overlapping word windows, each window is
//! summarized on its own, and the partial summaries are then synthesized into
//! one final summary with exactly one further backend call, bounded by the
//! same target length as a non-chunked run.

use crate::{
    chunk::{self, ChunkDomain, Span},
    config::PipelineConfig,
    error::{Error, Stage},
    llm::{BackendError, Summarizer},
    types::word_count,
};

const SINGLE_PROMPT: &str = include_str!("./llm/prompts/summarize_single.txt");
const SECTION_PROMPT: &str = include_str!("./llm/prompts/summarize_section.txt");
const SYNTHESIS_PROMPT: &str = include_str!("./llm/prompts/summarize_synthesis.txt");

/// Summarizes a transcript, chunking by word count when it exceeds the
/// configured threshold.
pub async fn summarize_text<S>(
    summarizer: &S,
    transcript: &str,
    config: &PipelineConfig,
) -> Result<String, Error>
where
    S: Summarizer + Sync,
{
    let domain = TextDomain {
        summarizer,
        unit_words: config.summary_chunk_words,
        overlap_words: config.summary_overlap_words,
        threshold_words: config.summary_chunk_threshold,
        max_summary_words: config.max_summary_words,
    };
    chunk::run(&domain, transcript).await
}

struct TextDomain<'a, S> {
    summarizer: &'a S,
    unit_words: u64,
    overlap_words: u64,
    threshold_words: u64,
    max_summary_words: u64,
}

impl<S> ChunkDomain for TextDomain<'_, S>
where
    S: Summarizer + Sync,
{
    type Input = str;

    const STAGE: Stage = Stage::Summarization;

    fn measure(&self, input: &str) -> u64 {
        word_count(input) as u64
    }

    fn threshold(&self) -> u64 {
        self.threshold_words
    }

    fn unit_size(&self) -> u64 {
        self.unit_words
    }

    fn overlap(&self) -> u64 {
        self.overlap_words
    }

    async fn process_whole(&self, input: &str) -> Result<String, BackendError> {
        let prompt = SINGLE_PROMPT
            .replace("{transcript}", input)
            .replace("{max_words}", &self.max_summary_words.to_string());
        self.summarizer.generate(&prompt).await
    }

    async fn process_span(&self, input: &str, span: Span) -> Result<String, BackendError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let section = words[span.start as usize..span.end as usize].join(" ");
        let prompt = SECTION_PROMPT.replace("{section}", &section);
        self.summarizer.generate(&prompt).await
    }

    async fn combine(&self, partials: Vec<String>) -> Result<String, BackendError> {
        let sections = partials.join("\n\n");
        let prompt = SYNTHESIS_PROMPT
            .replace("{sections}", &sections)
            .replace("{max_words}", &self.max_summary_words.to_string());
        self.summarizer.generate(&prompt).await
    }
}
