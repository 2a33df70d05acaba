//! Chunk planning and map-reduce execution shared by the transcription and
//! summarization pipelines.
//!
//! Both domains follow the same shape: measure the input, take the single-shot
//! path when it fits the processing window, otherwise split it into ordered
//! spans, process each span with one backend call, and combine the partials.
//! The domain-specific parts (how to measure, slice, and combine) live behind
//! [`ChunkDomain`].

use std::future::Future;

use crate::{
    error::{Error, Location, Stage},
    llm::BackendError,
};

/// One bounded slice of an ordered input. Units are domain-native: seconds
/// for audio, words for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Zero-based position in the segment sequence.
    pub index: usize,
    pub start: u64,
    /// Exclusive end offset.
    pub end: u64,
}

impl Span {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 1-based ordinal, used for logging and error context.
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }
}

/// Plans ordered, covering spans over an input of length `len`.
///
/// Spans are `unit` long (the final one may be shorter) and stride by
/// `unit - overlap`, so adjacent spans share `overlap` units of context.
/// With `overlap == 0` this degenerates to ceil-divided contiguous windows.
pub fn plan_spans(len: u64, unit: u64, overlap: u64) -> Result<Vec<Span>, Error> {
    validate_stride(unit, overlap)?;

    if len == 0 {
        return Ok(Vec::new());
    }
    if len <= unit {
        return Ok(vec![Span {
            index: 0,
            start: 0,
            end: len,
        }]);
    }

    let stride = unit - overlap;
    let mut spans = Vec::new();
    let mut start = 0;
    while start < len {
        spans.push(Span {
            index: spans.len(),
            start,
            end: (start + unit).min(len),
        });
        start += stride;
    }
    Ok(spans)
}

fn validate_stride(unit: u64, overlap: u64) -> Result<(), Error> {
    if unit == 0 {
        return Err(Error::Config("segment unit size must be non-zero".into()));
    }
    if overlap >= unit {
        return Err(Error::Config(format!(
            "segment overlap ({overlap}) must be smaller than unit size ({unit})"
        )));
    }
    Ok(())
}

/// Domain policy driving [`run`]: how to measure an input, process one span
/// or the whole input with a single backend call, and combine partials.
pub trait ChunkDomain {
    type Input: ?Sized + Sync;

    const STAGE: Stage;

    fn measure(&self, input: &Self::Input) -> u64;
    fn threshold(&self) -> u64;
    fn unit_size(&self) -> u64;
    fn overlap(&self) -> u64;

    /// Single backend call over the whole input (below-threshold path).
    fn process_whole(
        &self,
        input: &Self::Input,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Single backend call over one span.
    fn process_span(
        &self,
        input: &Self::Input,
        span: Span,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Combines ordered partial results into the final output. May issue at
    /// most one further backend call (the synthesis pass).
    fn combine(
        &self,
        partials: Vec<String>,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;
}

/// Runs one map-reduce pass over `input`.
///
/// Inputs at or below the threshold are processed in a single call with no
/// segmentation. Above it, spans are processed strictly in order and any
/// failure aborts the run; there is no partial-success output, since an
/// incomplete transcript or summary would silently misrepresent the source.
pub async fn run<D: ChunkDomain>(domain: &D, input: &D::Input) -> Result<String, Error> {
    validate_stride(domain.unit_size(), domain.overlap())?;

    let len = domain.measure(input);
    if len <= domain.threshold() {
        tracing::debug!(stage = %D::STAGE, len, "input within processing window, single shot");
        return settle(
            domain.process_whole(input).await,
            Location::whole(D::STAGE),
        );
    }

    let spans = plan_spans(len, domain.unit_size(), domain.overlap())?;
    tracing::info!(
        stage = %D::STAGE,
        len,
        segments = spans.len(),
        "input exceeds threshold, chunking"
    );

    let mut partials = Vec::with_capacity(spans.len());
    for span in &spans {
        tracing::debug!(
            stage = %D::STAGE,
            segment = span.ordinal(),
            total = spans.len(),
            start = span.start,
            end = span.end,
            "processing segment"
        );
        let partial = settle(
            domain.process_span(input, *span).await,
            Location::segment(D::STAGE, span.ordinal()),
        )?;
        partials.push(partial);
    }

    settle(
        domain.combine(partials).await,
        Location::aggregate(D::STAGE),
    )
}

/// Maps a unit-processor outcome into the pipeline error taxonomy. A blank
/// result is a distinct failure from a transport one: the call succeeded but
/// the backend produced nothing usable.
fn settle(result: Result<String, BackendError>, at: Location) -> Result<String, Error> {
    match result {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                Err(Error::EmptyResult { location: at })
            } else {
                Ok(text.to_string())
            }
        }
        Err(BackendError::Empty) => Err(Error::EmptyResult { location: at }),
        Err(source) => Err(Error::Transport {
            location: at,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_yields_one_span() {
        let spans = plan_spans(1500, 2000, 100).unwrap();
        assert_eq!(
            spans,
            vec![Span {
                index: 0,
                start: 0,
                end: 1500
            }]
        );
    }

    #[test]
    fn input_equal_to_unit_yields_one_span() {
        let spans = plan_spans(2000, 2000, 100).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].end, 2000);
    }

    #[test]
    fn overlapping_text_spans_match_stride() {
        // 6500 words, unit 2000, overlap 100 -> stride 1900 -> 4 spans
        let spans = plan_spans(6500, 2000, 100).unwrap();
        let bounds: Vec<(u64, u64)> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(
            bounds,
            vec![(0, 2000), (1900, 3900), (3800, 5800), (5700, 6500)]
        );
    }

    #[test]
    fn contiguous_audio_spans_are_ceil_divided() {
        let spans = plan_spans(4000, 1800, 0).unwrap();
        assert_eq!(spans.len(), 3); // ceil(4000 / 1800)
        let bounds: Vec<(u64, u64)> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(bounds, vec![(0, 1800), (1800, 3600), (3600, 4000)]);
    }

    #[test]
    fn spans_cover_input_without_gaps() {
        for len in [1, 99, 100, 101, 1899, 1900, 1901, 6500, 10_000] {
            let spans = plan_spans(len, 2000, 100).unwrap();
            assert!(!spans.is_empty());
            assert_eq!(spans[0].start, 0);
            assert_eq!(spans.last().unwrap().end, len);
            for pair in spans.windows(2) {
                // next span starts at or before the previous end
                assert!(pair[1].start <= pair[0].end, "gap in coverage at len={len}");
                assert!(pair[1].start > pair[0].start);
                assert_eq!(pair[1].index, pair[0].index + 1);
            }
        }
    }

    #[test]
    fn overlap_equal_to_unit_is_a_config_error() {
        let err = plan_spans(6500, 100, 100).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_unit_is_a_config_error() {
        let err = plan_spans(10, 0, 0).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_input_yields_no_spans() {
        assert!(plan_spans(0, 2000, 100).unwrap().is_empty());
    }
}
