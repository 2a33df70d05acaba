use std::time::Duration;

use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;

use crate::llm::{BackendError, Summarizer, TranscriptEnricher};

/// Client for a local Ollama inference endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: ClientWithMiddleware,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    const LABEL_PROMPT: &'static str = include_str!("./prompts/label_speakers.txt");

    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        Ok(OllamaClient {
            client: crate::llm::http_client(timeout)?,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_generate_request(&self, prompt: &str) -> Result<GenerateResponse, BackendError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.3,
                "top_p": 0.9,
            }
        });

        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, message });
        }

        Ok(resp.json::<GenerateResponse>().await?)
    }
}

impl Summarizer for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .send_generate_request(prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to generate completion"))?;

        let text = response.response.trim().to_string();
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text)
    }

    async fn ensure_ready(&self) -> Result<(), BackendError> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, message });
        }

        let tags = resp.json::<TagsResponse>().await?;
        let available = tags.models.iter().any(|m| m.name.contains(&self.model));
        if !available {
            return Err(BackendError::ModelUnavailable(self.model.clone()));
        }
        Ok(())
    }
}

impl TranscriptEnricher for OllamaClient {
    async fn enrich(&self, transcript: &str) -> Result<String, BackendError> {
        let prompt = Self::LABEL_PROMPT.replace("{transcript}", transcript);
        let response = self.send_generate_request(&prompt).await?;

        let text = response.response.trim().to_string();
        if text.is_empty() {
            return Err(BackendError::Empty);
        }
        Ok(text)
    }
}
