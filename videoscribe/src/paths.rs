//! Filesystem layout: `input/` and `output/` at the workspace root, and a
//! per-video directory under `output/` that holds the transcripts and the
//! (optionally kept) extracted audio.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// The two top-level directories, created once at startup.
#[derive(Debug, Clone)]
pub struct Dirs {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Create `input/` and `output/` under `root` if absent.
pub fn setup_dirs(root: &Path) -> Result<Dirs> {
    let input = root.join("input");
    let output = root.join("output");
    std::fs::create_dir_all(&input)?;
    std::fs::create_dir_all(&output)?;
    Ok(Dirs { input, output })
}

/// Output locations for one video: `output/<stem>/` holds
/// `<stem>_transcription.<ext>` per format and `<stem>_audio.wav`.
#[derive(Debug, Clone)]
pub struct JobPaths {
    dir: PathBuf,
    stem: String,
}

impl JobPaths {
    /// Derive the per-video layout from the video filename and create the
    /// directory. Existing files from a previous run are overwritten silently.
    pub fn for_video(output_dir: &Path, video_path: &Path) -> Result<Self> {
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::BadVideoPath {
                path: video_path.to_path_buf(),
            })?;

        let dir = output_dir.join(&stem);
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "per-video output directory ready");

        Ok(Self { dir, stem })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path of the extracted waveform file.
    pub fn audio_path(&self) -> PathBuf {
        self.dir.join(format!("{}_audio.wav", self.stem))
    }

    /// Path of the transcript file for a given format.
    pub fn transcript_path(&self, format: OutputFormat) -> PathBuf {
        self.dir
            .join(format!("{}_transcription.{}", self.stem, format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_dirs_creates_both() {
        let root = std::env::temp_dir().join("videoscribe_setup_dirs");
        std::fs::remove_dir_all(&root).ok();
        std::fs::create_dir_all(&root).unwrap();

        let dirs = setup_dirs(&root).unwrap();
        assert!(dirs.input.is_dir());
        assert!(dirs.output.is_dir());

        // Idempotent on a second run
        assert!(setup_dirs(&root).is_ok());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_job_paths_layout() {
        let root = std::env::temp_dir().join("videoscribe_job_paths");
        std::fs::remove_dir_all(&root).ok();
        std::fs::create_dir_all(&root).unwrap();

        let job = JobPaths::for_video(&root, Path::new("input/My Talk.mp4")).unwrap();
        assert_eq!(job.stem(), "My Talk");
        assert_eq!(job.dir(), root.join("My Talk"));
        assert!(job.dir().is_dir());
        assert_eq!(job.audio_path(), root.join("My Talk/My Talk_audio.wav"));
        assert_eq!(
            job.transcript_path(OutputFormat::Srt),
            root.join("My Talk/My Talk_transcription.srt")
        );
        assert_eq!(
            job.transcript_path(OutputFormat::Text),
            root.join("My Talk/My Talk_transcription.txt")
        );

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_job_paths_rejects_stemless_path() {
        let root = std::env::temp_dir().join("videoscribe_job_paths_bad");
        std::fs::create_dir_all(&root).unwrap();

        let err = JobPaths::for_video(&root, Path::new("..")).unwrap_err();
        assert!(matches!(err, Error::BadVideoPath { .. }));

        std::fs::remove_dir_all(&root).ok();
    }
}
