use std::path::PathBuf;

/// All errors that can occur in videoscribe.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("video not found: {path} (tip: place videos in the input/ folder)")]
    VideoNotFound { path: PathBuf },

    #[error("cannot derive a name from video path: {path}")]
    BadVideoPath { path: PathBuf },

    #[error("yt-dlp not found — install with: pip install yt-dlp")]
    YtDlpNotFound,

    #[error("download error: {0}")]
    Download(String),

    #[error("audio extraction error: {0}")]
    AudioExtraction(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("model download failed: {0}")]
    ModelDownload(String),

    #[error("unsupported language: \"{0}\"")]
    UnsupportedLanguage(String),

    #[error("transcription error: {0}")]
    Transcription(String),

    #[error("whisper error: {0}")]
    Whisper(#[from] whisper_rs::WhisperError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
