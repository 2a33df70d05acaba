use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::process::Command;

use crate::{
    types::VideoMetadata,
    yt::{AcquireError, AudioSource, AUDIO_EXTENSIONS},
};

/// Primary encoding, then the fallback tried when the first download fails
/// validation.
const FORMAT_LADDER: &[&str] = &["mp3", "m4a"];
const AUDIO_QUALITY: &str = "128K";

/// Anything smaller than this is treated as a failed download, not audio.
const MIN_ARTIFACT_BYTES: u64 = 4096;

/// Acquisition gate backed by the `yt-dlp` and `ffprobe` binaries.
#[derive(Debug, Clone)]
pub struct YtDlp {
    bin: PathBuf,
    ffprobe_bin: PathBuf,
    cookies: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ProbeInfo {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

impl Default for YtDlp {
    fn default() -> Self {
        YtDlp {
            bin: PathBuf::from("yt-dlp"),
            ffprobe_bin: PathBuf::from("ffprobe"),
            cookies: None,
        }
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookies(mut self, cookies: Option<PathBuf>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.bin = bin.into();
        self
    }

    pub fn with_ffprobe(mut self, ffprobe_bin: impl Into<PathBuf>) -> Self {
        self.ffprobe_bin = ffprobe_bin.into();
        self
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = vec!["--no-playlist".to_string()];
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }
        args
    }

    async fn download_format(
        &self,
        url: &str,
        video_id: &str,
        format: &str,
        workdir: &Path,
    ) -> Result<PathBuf, AcquireError> {
        let output_template = workdir.join("%(id)s.%(ext)s");
        let expected = workdir.join(format!("{video_id}.{format}"));

        let output = Command::new(&self.bin)
            .args(self.base_args())
            .args(["-f", "bestaudio/best", "-x", "--audio-format", format])
            .args(["--audio-quality", AUDIO_QUALITY])
            .args(["-o", &output_template.display().to_string()])
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AcquireError::Tool {
                tool: "yt-dlp",
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        if let Err(e) = self.validate_artifact(&expected).await {
            // a rejected download must not occupy the artifact slot while the
            // next format is tried
            match tokio::fs::remove_file(&expected).await {
                Ok(()) => {}
                Err(rm) if rm.kind() == std::io::ErrorKind::NotFound => {}
                Err(rm) => {
                    tracing::warn!(error = %rm, path = %expected.display(), "failed to remove rejected artifact")
                }
            }
            return Err(e);
        }
        Ok(expected)
    }

    /// Post-download validation: the file must exist, be plausibly sized, and
    /// decode under ffprobe.
    async fn validate_artifact(&self, path: &Path) -> Result<(), AcquireError> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|_| AcquireError::MissingOutput(path.to_path_buf()))?;

        if meta.len() < MIN_ARTIFACT_BYTES {
            return Err(AcquireError::ImplausiblySmall {
                path: path.to_path_buf(),
                size: meta.len(),
            });
        }

        let output = Command::new(&self.ffprobe_bin)
            .args(["-v", "error", "-show_entries", "format=duration"])
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(path)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AcquireError::Undecodable(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        Ok(())
    }
}

impl AudioSource for YtDlp {
    #[tracing::instrument(skip(self))]
    async fn probe(&self, url: &str) -> Result<VideoMetadata, AcquireError> {
        let output = Command::new(&self.bin)
            .args(self.base_args())
            .args(["-J", "--no-download"])
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(AcquireError::Tool {
                tool: "yt-dlp",
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let info: ProbeInfo = serde_json::from_slice(&output.stdout)?;
        Ok(VideoMetadata {
            title: info.title.unwrap_or_else(|| "Unknown".to_string()),
            duration: info.duration.unwrap_or(0.0).round() as u64,
            channel: info.uploader.unwrap_or_else(|| "Unknown".to_string()),
            video_id: info.id,
            url: url.to_string(),
        })
    }

    #[tracing::instrument(skip(self, meta), fields(video_id = %meta.video_id))]
    async fn acquire(
        &self,
        url: &str,
        meta: &VideoMetadata,
        workdir: &Path,
    ) -> Result<PathBuf, AcquireError> {
        let mut last_err = None;
        for format in FORMAT_LADDER {
            match self
                .download_format(url, &meta.video_id, format, workdir)
                .await
            {
                Ok(path) => {
                    tracing::info!(path = %path.display(), format, "audio artifact acquired");
                    return Ok(path);
                }
                Err(e) => {
                    tracing::warn!(error = %e, format, "audio download failed");
                    last_err = Some(e);
                }
            }
        }
        // FORMAT_LADDER is non-empty, so last_err is always set here
        Err(AcquireError::FormatsExhausted(Box::new(
            last_err.unwrap_or(AcquireError::MissingOutput(workdir.to_path_buf())),
        )))
    }

    fn release_stale(&self, workdir: &Path, keep: Option<&str>) {
        let entries = match std::fs::read_dir(workdir) {
            Ok(entries) => entries,
            Err(_) => return, // nothing retained yet
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_audio = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext));
            if !is_audio {
                continue;
            }
            let protected = keep.is_some_and(|id| {
                path.file_stem().and_then(|s| s.to_str()) == Some(id)
            });
            if protected {
                continue;
            }
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(error = %e, path = %path.display(), "failed to remove stale artifact");
            } else {
                tracing::info!(path = %path.display(), "removed stale artifact");
            }
        }
    }
}
