use std::fmt;

use crate::{llm::BackendError, yt::AcquireError};

/// Pipeline stage a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Acquisition,
    Transcription,
    Summarization,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Acquisition => "acquisition",
            Stage::Transcription => "transcription",
            Stage::Summarization => "summarization",
        };
        f.write_str(name)
    }
}

/// Where within a stage a backend call sat: the whole input, one segment
/// (1-based ordinal), or the aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Whole,
    Segment(usize),
    Aggregate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub stage: Stage,
    pub phase: Phase,
}

impl Location {
    pub fn whole(stage: Stage) -> Self {
        Location {
            stage,
            phase: Phase::Whole,
        }
    }

    pub fn segment(stage: Stage, ordinal: usize) -> Self {
        Location {
            stage,
            phase: Phase::Segment(ordinal),
        }
    }

    pub fn aggregate(stage: Stage) -> Self {
        Location {
            stage,
            phase: Phase::Aggregate,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Whole => write!(f, "{}", self.stage),
            Phase::Segment(n) => write!(f, "{} segment {}", self.stage, n),
            Phase::Aggregate => write!(f, "{} aggregation", self.stage),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid pipeline configuration: {0}")]
    Config(String),

    #[error("video duration {duration}s exceeds the {max}s limit")]
    LimitExceeded { duration: u64, max: u64 },

    #[error("audio acquisition failed: {0}")]
    Acquisition(#[from] AcquireError),

    #[error("{location} backend call failed: {source}")]
    Transport {
        location: Location,
        #[source]
        source: BackendError,
    },

    #[error("{location} returned no usable output")]
    EmptyResult { location: Location },
}

/// Coarse category for programmatic callers: bad input vs. everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRequest,
    Processing,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::LimitExceeded { .. } => ErrorKind::InvalidRequest,
            Error::Acquisition(AcquireError::BadUrl(_)) => ErrorKind::InvalidRequest,
            _ => ErrorKind::Processing,
        }
    }
}
