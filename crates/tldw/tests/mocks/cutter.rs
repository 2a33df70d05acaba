use std::{
    path::Path,
    sync::{Arc, Mutex},
};
use tldw::{yt::ffmpeg::AudioCutter, BackendError};

#[derive(Clone, Default)]
pub struct MockCutter {
    /// (start_secs, duration_secs) per cut, in order.
    pub calls: Arc<Mutex<Vec<(u64, u64)>>>,
}

impl AudioCutter for MockCutter {
    async fn cut(
        &self,
        _src: &Path,
        start_secs: u64,
        duration_secs: u64,
        dest: &Path,
    ) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push((start_secs, duration_secs));
        std::fs::write(dest, b"clip")?;
        Ok(())
    }
}
