use std::{path::Path, time::Duration};

use reqwest::Client;
use serde::Deserialize;

use crate::llm::{BackendError, Transcriber};

/// Client for a local whisper.cpp `server` instance.
///
/// Language and precision are pinned here rather than exposed to callers:
/// English, temperature 0, so runs are reproducible. Uses a plain client
/// rather than the retrying one: multipart bodies cannot be replayed.
#[derive(Clone)]
pub struct WhisperClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    text: String,
}

impl WhisperClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        Ok(WhisperClient {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
        })
    }

    async fn send_inference_request(&self, audio: &Path) -> Result<InferenceResponse, BackendError> {
        let bytes = tokio::fs::read(audio).await?;
        let file_name = audio
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")?;

        let form = reqwest::multipart::Form::new()
            .text("response_format", "json")
            .text("language", "en")
            .text("temperature", "0.0")
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/inference", self.base_url))
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, message });
        }

        Ok(resp.json::<InferenceResponse>().await?)
    }
}

impl Transcriber for WhisperClient {
    async fn transcribe(&self, audio: &Path) -> Result<String, BackendError> {
        let response = self
            .send_inference_request(audio)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to transcribe audio"))?;

        let text = response.text.trim().to_string();
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text)
    }

    async fn ensure_ready(&self) -> Result<(), BackendError> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, message });
        }
        Ok(())
    }
}
