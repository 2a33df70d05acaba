use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use tldw::{
    tracing::init_tracing_subscriber,
    yt::{ffmpeg::Ffmpeg, ytdlp::YtDlp},
    ErrorKind, OllamaClient, PipelineConfig, Summarizer, Transcriber, VideoProcessorBuilder,
    WhisperClient,
};

#[derive(Parser)]
#[command(name = "tldw", about = "Turn a video URL into a transcript and summary")]
struct Cli {
    /// Ollama inference endpoint
    #[arg(long, env = "OLLAMA_BASE_URL", default_value = "http://localhost:11434")]
    ollama_url: String,

    /// whisper.cpp server endpoint
    #[arg(long, env = "WHISPER_BASE_URL", default_value = "http://127.0.0.1:8080")]
    whisper_url: String,

    /// Summarization model name
    #[arg(
        long,
        env = "SUMMARIZATION_MODEL",
        default_value = "llama3.1:8b-instruct-q4_K_M"
    )]
    model: String,

    /// Path to yt-dlp cookies file
    #[arg(long, env = "YTDLP_COOKIES_PATH")]
    cookies_path: Option<PathBuf>,

    /// Maximum video duration in seconds
    #[arg(long, env = "MAX_VIDEO_DURATION", default_value = "7200")]
    max_duration: u64,

    /// Audio chunk duration in minutes
    #[arg(long, env = "CHUNK_DURATION_MINUTES", default_value = "30")]
    chunk_minutes: u64,

    /// Per backend call timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "300")]
    timeout_secs: u64,

    /// Working directory for downloaded audio
    #[arg(long, env = "DOWNLOAD_DIR", default_value = "downloads")]
    workdir: PathBuf,

    /// Attribute speakers in the transcript (best effort)
    #[arg(long)]
    label_speakers: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Digest a single video URL
    Run { url: String },
    /// Check that both model backends are reachable
    Check,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = PipelineConfig {
        max_video_duration: cli.max_duration,
        audio_chunk_secs: cli.chunk_minutes * 60,
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..PipelineConfig::default()
    };

    let whisper = WhisperClient::new(&cli.whisper_url, config.request_timeout)?;
    let ollama = OllamaClient::new(&cli.ollama_url, &cli.model, config.request_timeout)?;

    match cli.command {
        Command::Check => {
            let stt = whisper.ensure_ready().await;
            let summarization = ollama.ensure_ready().await;

            let report = serde_json::json!({
                "stt_model": {
                    "name": "whisper.cpp server",
                    "available": stt.is_ok(),
                },
                "summarization_model": {
                    "name": ollama.model(),
                    "available": summarization.is_ok(),
                },
            });
            println!("{}", serde_json::to_string_pretty(&report)?);

            if let Err(e) = stt {
                tracing::warn!(error = %e, "speech-to-text backend not ready");
            }
            if let Err(e) = summarization {
                tracing::warn!(error = %e, "summarization backend not ready");
            }
        }
        Command::Run { url } => {
            let source = YtDlp::new().with_cookies(cli.cookies_path.clone());
            let builder = VideoProcessorBuilder::new(&cli.workdir)
                .source(source)
                .transcriber(whisper)
                .summarizer(ollama.clone())
                .cutter(Ffmpeg::new())
                .config(config);

            let result = if cli.label_speakers {
                builder.enricher(ollama).build().run(&url).await
            } else {
                builder.build().run(&url).await
            };

            match result {
                Ok(digest) => println!("{}", serde_json::to_string_pretty(&digest)?),
                Err(e) => match e.kind() {
                    ErrorKind::InvalidRequest => {
                        tracing::error!(error = %e, "rejected request");
                        eprintln!("invalid request: {e}");
                        std::process::exit(2);
                    }
                    ErrorKind::Processing => return Err(e.into()),
                },
            }
        }
    }

    Ok(())
}
