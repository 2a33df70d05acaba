use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tldw::{BackendError, Transcriber};

#[derive(Clone)]
pub struct MockTranscriber {
    /// One response per call; the last one repeats.
    pub responses: Vec<String>,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_with: Option<String>,
    /// 1-based call ordinal that returns a blank result.
    pub empty_on: Option<usize>,
}

impl MockTranscriber {
    pub fn new(text: &str) -> Self {
        Self::with_responses(vec![text.to_string()])
    }

    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses,
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

impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String, BackendError> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(audio.to_path_buf());
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
        let idx = (call - 1).min(self.responses.len() - 1);
        Ok(self.responses[idx].clone())
    }

    async fn ensure_ready(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
