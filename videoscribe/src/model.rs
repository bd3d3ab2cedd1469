use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::error::{Error, Result};

const HUGGINGFACE_BASE: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Whisper model sizes: the accuracy/speed tradeoff selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// Model filename as used by HuggingFace / whisper.cpp.
    pub fn filename(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "ggml-tiny.bin",
            ModelSize::Base => "ggml-base.bin",
            ModelSize::Small => "ggml-small.bin",
            ModelSize::Medium => "ggml-medium.bin",
            ModelSize::Large => "ggml-large-v3.bin",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// Parse from string (e.g. CLI argument).
    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "tiny" => Some(ModelSize::Tiny),
            "base" => Some(ModelSize::Base),
            "small" => Some(ModelSize::Small),
            "medium" => Some(ModelSize::Medium),
            "large" => Some(ModelSize::Large),
            _ => None,
        }
    }

    /// All valid size names, for CLI error messages.
    pub fn names() -> [&'static str; 5] {
        ["tiny", "base", "small", "medium", "large"]
    }
}

/// Ensure a model is available locally, downloading if necessary.
/// Returns the path to the model file.
pub async fn ensure_model(model: ModelSize, cache_dir: &Path) -> Result<PathBuf> {
    let filename = model.filename();
    let model_path = cache_dir.join(filename);

    if model_path.exists() {
        info!(path = %model_path.display(), "model already cached");
        return Ok(model_path);
    }

    std::fs::create_dir_all(cache_dir).map_err(|e| {
        Error::Model(format!(
            "failed to create cache dir {}: {e}",
            cache_dir.display()
        ))
    })?;

    let url = format!("{HUGGINGFACE_BASE}/{filename}");
    info!(%url, "downloading model");
    download_model(&url, &model_path).await?;

    Ok(model_path)
}

async fn download_model(url: &str, dest: &Path) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| Error::ModelDownload(format!("HTTP error: {e}")))?;

    let total_size = response.content_length().unwrap_or(0);

    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            .expect("valid template")
            .progress_chars("#>-"),
    );
    pb.set_message(format!(
        "Downloading {}",
        dest.file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default()
    ));

    // Write to a temp file first, then rename (atomic-ish)
    let tmp_path = dest.with_extension("bin.part");
    let mut file = std::fs::File::create(&tmp_path)?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    use std::io::Write;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    drop(file);

    // Verify we got something reasonable
    let file_size = std::fs::metadata(&tmp_path)?.len();
    if file_size < 1_000_000 {
        std::fs::remove_file(&tmp_path).ok();
        return Err(Error::ModelDownload(format!(
            "downloaded file too small ({file_size} bytes) — likely an error page"
        )));
    }

    std::fs::rename(&tmp_path, dest)?;
    pb.finish_with_message("Download complete");

    if total_size > 0 && file_size != total_size {
        warn!(
            expected = total_size,
            actual = file_size,
            "file size mismatch — model may be corrupt"
        );
    }

    info!(path = %dest.display(), size = file_size, "model saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_round_trip() {
        for name in ModelSize::names() {
            let size = ModelSize::parse_name(name).unwrap();
            assert_eq!(size.name(), name);
        }
    }

    #[test]
    fn test_parse_name_rejects_unknown() {
        assert!(ModelSize::parse_name("huge").is_none());
        assert!(ModelSize::parse_name("").is_none());
    }

    #[test]
    fn test_filenames() {
        assert_eq!(ModelSize::Tiny.filename(), "ggml-tiny.bin");
        assert_eq!(ModelSize::Large.filename(), "ggml-large-v3.bin");
    }

    #[tokio::test]
    async fn test_ensure_model_uses_cache() {
        let cache_dir = std::env::temp_dir().join("videoscribe_model_cache");
        std::fs::remove_dir_all(&cache_dir).ok();
        std::fs::create_dir_all(&cache_dir).unwrap();
        let model_file = cache_dir.join("ggml-tiny.bin");
        std::fs::write(&model_file, b"fake model data").unwrap();

        let path = ensure_model(ModelSize::Tiny, &cache_dir).await.unwrap();
        assert_eq!(path, model_file);
        // Cache hit: the file comes back untouched, nothing was downloaded
        assert_eq!(std::fs::read(&path).unwrap(), b"fake model data");

        std::fs::remove_dir_all(&cache_dir).ok();
    }

    #[tokio::test]
    async fn test_ensure_model_unusable_cache_dir() {
        let base = std::env::temp_dir().join("videoscribe_model_cache_bad");
        std::fs::remove_dir_all(&base).ok();
        std::fs::create_dir_all(&base).unwrap();
        // A plain file where the cache directory should go
        let blocker = base.join("not_a_dir");
        std::fs::write(&blocker, b"blocker").unwrap();

        let err = ensure_model(ModelSize::Tiny, &blocker).await.unwrap_err();
        assert!(matches!(err, Error::Model(_)));

        std::fs::remove_dir_all(&base).ok();
    }
}
