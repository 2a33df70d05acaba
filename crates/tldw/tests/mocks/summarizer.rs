use std::sync::{Arc, Mutex};
use tldw::{BackendError, Summarizer};

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    /// Prompts received, in order.
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
    /// 1-based call ordinal that returns a blank result.
    pub empty_on: Option<usize>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
            empty_on: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl Summarizer for MockSummarizer {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(prompt.to_string());
            calls.len()
        };
        if let Some(ref msg) = self.fail_with {
            return Err(BackendError::Api {
                status: 500,
                message: msg.clone(),
            });
        }
        if self.empty_on == Some(call) {
            return Ok(String::new());
        }
        Ok(self.summary.clone())
    }

    async fn ensure_ready(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
