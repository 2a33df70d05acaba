use std::{
    future::Future,
    path::{Path, PathBuf},
};

use tokio::process::Command;

use crate::llm::BackendError;

/// Exports a bounded sub-clip of an audio file. Seam for tests; the real
/// implementation shells out to ffmpeg.
pub trait AudioCutter {
    fn cut(
        &self,
        src: &Path,
        start_secs: u64,
        duration_secs: u64,
        dest: &Path,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    bin: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Ffmpeg {
            bin: PathBuf::from("ffmpeg"),
        }
    }
}

impl Ffmpeg {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioCutter for Ffmpeg {
    async fn cut(
        &self,
        src: &Path,
        start_secs: u64,
        duration_secs: u64,
        dest: &Path,
    ) -> Result<(), BackendError> {
        let output = Command::new(&self.bin)
            .args(["-y", "-v", "error"])
            .args(["-ss", &start_secs.to_string()])
            .args(["-t", &duration_secs.to_string()])
            .arg("-i")
            .arg(src)
            .args(["-vn", "-acodec", "copy"])
            .arg(dest)
            .output()
            .await?;

        if !output.status.success() {
            return Err(BackendError::Ffmpeg(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        Ok(())
    }
}
