use std::sync::{Arc, Mutex};
use tldw::{BackendError, TranscriptEnricher};

#[derive(Clone)]
pub struct MockEnricher {
    pub labeled: Option<String>,
    pub calls: Arc<Mutex<usize>>,
    pub fail_with: Option<String>,
}

impl MockEnricher {
    pub fn new(labeled: &str) -> Self {
        Self {
            labeled: Some(labeled.to_string()),
            calls: Arc::new(Mutex::new(0)),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            labeled: None,
            calls: Arc::new(Mutex::new(0)),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptEnricher for MockEnricher {
    async fn enrich(&self, transcript: &str) -> Result<String, BackendError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(ref msg) = self.fail_with {
            return Err(BackendError::Api {
                status: 500,
                message: msg.clone(),
            });
        }
        Ok(self
            .labeled
            .clone()
            .unwrap_or_else(|| transcript.to_string()))
    }
}
