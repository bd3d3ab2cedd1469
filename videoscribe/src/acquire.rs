//! Resolving the input into a local video file: either a path on disk
//! (checked directly, then under the input directory) or a YouTube URL
//! downloaded with yt-dlp.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Hostnames we recognize as video URLs, checked after stripping an optional
/// scheme and `www.` prefix. The trailing slash keeps `youtube.common.example`
/// from matching.
const VIDEO_HOSTS: [&str; 4] = [
    "youtube.com/",
    "youtu.be/",
    "youtube-nocookie.com/",
    "m.youtube.com/",
];

/// Deterministic check whether the input is a recognized video-hosting URL.
pub fn is_video_url(input: &str) -> bool {
    let rest = input.trim();
    let rest = rest
        .strip_prefix("https://")
        .or_else(|| rest.strip_prefix("http://"))
        .unwrap_or(rest);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    VIDEO_HOSTS.iter().any(|host| rest.starts_with(host))
}

/// Resolve a local video path: the path as given, falling back to the
/// input directory.
pub fn resolve_local_video(input: &str, input_dir: &Path) -> Result<PathBuf> {
    let path = PathBuf::from(input);
    if path.is_file() {
        return Ok(path);
    }

    let fallback = input_dir.join(input);
    if fallback.is_file() {
        return Ok(fallback);
    }

    Err(Error::VideoNotFound { path })
}

/// Download a video from a URL using yt-dlp into `dest_dir`.
/// Returns the path to the downloaded video file.
///
/// Arguments are passed via `.arg()` (no shell expansion), `--no-exec`
/// prevents yt-dlp from running post-processing commands, and the returned
/// path is validated to be inside `dest_dir`.
pub async fn download_video(url: &str, dest_dir: &Path) -> Result<PathBuf> {
    info!(%url, "downloading video");

    // Check yt-dlp is installed
    let check = tokio::process::Command::new("yt-dlp")
        .arg("--version")
        .output()
        .await;

    if check.is_err() {
        return Err(Error::YtDlpNotFound);
    }

    std::fs::create_dir_all(dest_dir)?;

    let output_template = dest_dir
        .join("%(title)s.%(ext)s")
        .to_str()
        .ok_or_else(|| Error::Download("destination path contains invalid UTF-8".into()))?
        .to_string();

    let output = tokio::process::Command::new("yt-dlp")
        .args([
            "--format",
            "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best",
            "--no-playlist",
            "--no-exec",
            "--output",
            &output_template,
            "--print",
            "after_move:filepath",
            "--no-simulate",
        ])
        .arg(url)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        // Limit error message length to avoid dumping huge stderr
        let stderr_truncated: String = stderr.chars().take(1000).collect();
        return Err(Error::Download(format!("yt-dlp failed: {stderr_truncated}")));
    }

    let video_path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();

    // yt-dlp --print after_move:filepath gives us the final path
    let video_path = if video_path_str.is_empty() {
        // Fallback: find the file in dest_dir
        find_video_file(dest_dir)?
    } else {
        let candidate = PathBuf::from(&video_path_str);
        validate_path_in_dir(&candidate, dest_dir)?;
        candidate
    };

    if !video_path.exists() {
        return Err(Error::Download(format!(
            "downloaded file not found at {}",
            video_path.display()
        )));
    }

    debug!(path = %video_path.display(), "video downloaded");

    Ok(video_path)
}

/// Normalize a path by resolving `.` and `..` components without touching the
/// filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    use std::path::Component;
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir => {}
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Validate that a path is inside the expected directory (prevents path
/// traversal).
fn validate_path_in_dir(path: &Path, expected_dir: &Path) -> Result<()> {
    // Try filesystem canonicalization first (most reliable when paths exist)
    let canonical_dir = expected_dir
        .canonicalize()
        .unwrap_or_else(|_| normalize_path(expected_dir));
    let canonical_path = path
        .canonicalize()
        .unwrap_or_else(|_| normalize_path(path));

    if canonical_path.starts_with(&canonical_dir) {
        Ok(())
    } else {
        warn!(
            path = %path.display(),
            expected_dir = %expected_dir.display(),
            "downloaded file path outside expected directory"
        );
        Err(Error::Download(
            "downloaded file path is outside the expected destination directory".into(),
        ))
    }
}

/// Find the most recently modified video file in a directory.
fn find_video_file(dir: &Path) -> Result<PathBuf> {
    let mut best: Option<(PathBuf, std::time::SystemTime)> = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            if matches!(ext, "mp4" | "mkv" | "webm" | "avi" | "mov") {
                if let Ok(meta) = entry.metadata() {
                    if let Ok(modified) = meta.modified() {
                        if best.as_ref().is_none_or(|(_, t)| modified > *t) {
                            best = Some((path, modified));
                        }
                    }
                }
            }
        }
    }

    best.map(|(p, _)| p)
        .ok_or_else(|| Error::Download("no video file found after download".into()))
}
