pub mod ollama;
pub mod summarizer;
pub mod transcriber;
pub mod whisper;

use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};

pub use summarizer::{Summarizer, TranscriptEnricher};
pub use transcriber::Transcriber;

/// Transient transport failures get a couple of bounded retries; anything
/// that survives them is terminal for the run.
const TRANSPORT_RETRIES: u32 = 2;

pub(crate) fn http_client(timeout: Duration) -> Result<ClientWithMiddleware, BackendError> {
    let inner = reqwest::Client::builder().timeout(timeout).build()?;
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(TRANSPORT_RETRIES);
    Ok(reqwest_middleware::ClientBuilder::new(inner)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Failure modes for a single backend call.
///
/// `Empty` is deliberately separate from the transport variants: the call
/// itself succeeded but the model produced nothing usable.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest_middleware::Error),
    #[error("HTTP error: {0}")]
    Decode(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("backend produced no usable output")]
    Empty,
    #[error("model {0} is not available on the backend")]
    ModelUnavailable(String),
    #[error("ffmpeg error: {0}")]
    Ffmpeg(String),
}
