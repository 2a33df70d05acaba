use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tldw::{
    types::VideoMetadata,
    yt::{parse_video_id, AcquireError, AudioSource},
};

#[derive(Clone)]
pub struct MockAudioSource {
    /// Duration reported by probe, in seconds.
    pub duration: u64,
    pub probe_calls: Arc<Mutex<Vec<String>>>,
    pub acquire_calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockAudioSource {
    pub fn with_duration(duration: u64) -> Self {
        Self {
            duration,
            probe_calls: Arc::new(Mutex::new(Vec::new())),
            acquire_calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::with_duration(600)
        }
    }
}

impl AudioSource for MockAudioSource {
    async fn probe(&self, url: &str) -> Result<VideoMetadata, AcquireError> {
        self.probe_calls.lock().unwrap().push(url.to_string());
        Ok(VideoMetadata {
            title: "Test Video".to_string(),
            duration: self.duration,
            channel: "Test Channel".to_string(),
            video_id: parse_video_id(url).unwrap_or_else(|| "abcdefghijk".to_string()),
            url: url.to_string(),
        })
    }

    async fn acquire(
        &self,
        url: &str,
        meta: &VideoMetadata,
        workdir: &Path,
    ) -> Result<PathBuf, AcquireError> {
        if let Some(ref msg) = self.fail_with {
            return Err(AcquireError::Tool {
                tool: "yt-dlp",
                status: 1,
                stderr: msg.clone(),
            });
        }
        self.acquire_calls.lock().unwrap().push(url.to_string());
        let path = workdir.join(format!("{}.mp3", meta.video_id));
        std::fs::write(&path, vec![0u8; 16])?;
        Ok(path)
    }

    fn release_stale(&self, _workdir: &Path, _keep: Option<&str>) {}
}
