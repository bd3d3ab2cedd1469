use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use videoscribe::paths::{self, JobPaths};
use videoscribe::timestamp::clock_time;
use videoscribe::{acquire, audio, Error, ModelSize, OutputFormat, TranscribeOptions};

#[derive(Parser)]
#[command(
    name = "videoscribe",
    about = "Transcribe a video file or YouTube URL using a local whisper model"
)]
struct Cli {
    /// Path to a video file (also checked under input/) or a YouTube URL.
    video_path: String,

    /// Whisper model size: tiny, base, small, medium, large.
    /// Larger = more accurate but slower.
    #[arg(short, long, default_value = "medium")]
    model: String,

    /// Language code hint (e.g. "en", "de"); auto-detect when omitted.
    #[arg(short, long)]
    language: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "txt")]
    format: FormatArg,

    /// Custom output file path (honored only when a single format is produced).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep the extracted audio file in the output folder.
    #[arg(long)]
    keep_audio: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Json,
    Srt,
    Vtt,
    /// Produce all four formats in one run.
    All,
}

impl FormatArg {
    fn formats(self) -> Vec<OutputFormat> {
        match self {
            FormatArg::Txt => vec![OutputFormat::Text],
            FormatArg::Json => vec![OutputFormat::Json],
            FormatArg::Srt => vec![OutputFormat::Srt],
            FormatArg::Vtt => vec![OutputFormat::Vtt],
            FormatArg::All => OutputFormat::all().to_vec(),
        }
    }
}

/// Removes the extracted waveform file when dropped, so cleanup runs on every
/// exit path out of `run` (success, formatting error, transcription error).
/// Not installed when the operator passed --keep-audio.
struct CleanupGuard(PathBuf);

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.0) {
            Ok(()) => tracing::debug!(path = %self.0.display(), "removed temporary audio file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.0.display(), error = %e, "failed to clean up audio file")
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("videoscribe=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> videoscribe::Result<()> {
    let model = ModelSize::parse_name(&cli.model).ok_or_else(|| {
        Error::Model(format!(
            "unknown model size \"{}\" (valid: {})",
            cli.model,
            ModelSize::names().join(", ")
        ))
    })?;

    let mut options = TranscribeOptions::new().model(model);
    if let Some(lang) = &cli.language {
        options = options.language(lang)?;
    }

    let dirs = paths::setup_dirs(Path::new("."))?;

    let video_path = if acquire::is_video_url(&cli.video_path) {
        eprintln!("YouTube URL detected, downloading video...");
        acquire::download_video(&cli.video_path, &dirs.input).await?
    } else {
        acquire::resolve_local_video(&cli.video_path, &dirs.input)?
    };

    eprintln!("Video: {}", video_path.display());

    let job = JobPaths::for_video(&dirs.output, &video_path)?;
    let audio_path = job.audio_path();

    // From here on the waveform is removed on every exit path unless kept
    let _guard = (!cli.keep_audio).then(|| CleanupGuard(audio_path.clone()));

    audio::extract_audio(&video_path, &audio_path)?;

    let result = videoscribe::transcribe(&audio_path, &options).await?;

    let formats = cli.format.formats();
    if cli.output.is_some() && formats.len() > 1 {
        eprintln!("Note: --output is ignored when multiple formats are produced");
    }
    for format in &formats {
        let rendered = videoscribe::render(&result, *format)?;
        let dest = match (&cli.output, formats.len()) {
            (Some(path), 1) => path.clone(),
            _ => job.transcript_path(*format),
        };
        std::fs::write(&dest, rendered)?;
        eprintln!("Saved {format} transcript to {}", dest.display());
    }

    eprintln!(
        "Transcription complete: model {}, language {}, processing time {}",
        model.name(),
        result.language,
        clock_time(result.elapsed_seconds)
    );
    if cli.keep_audio {
        eprintln!("Audio kept at {}", audio_path.display());
    }

    Ok(())
}
