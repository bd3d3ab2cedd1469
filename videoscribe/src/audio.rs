//! Audio extraction and decoding via ffmpeg subprocesses.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Target sample rate for whisper.cpp.
const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Extract the audio track of a video file into a 16kHz mono WAV.
///
/// The waveform file is what gets fed to the speech-recognition model, and is
/// the one temporary resource of a run (removed afterwards unless the operator
/// asked to keep it).
pub fn extract_audio(video_path: &Path, wav_path: &Path) -> Result<()> {
    info!(
        video = %video_path.display(),
        wav = %wav_path.display(),
        "extracting audio"
    );

    let output = Command::new("ffmpeg")
        .args(["-nostdin", "-i"])
        .arg(video_path)
        .args([
            "-vn",
            "-acodec",
            "pcm_s16le",
            "-ac",
            "1",
            "-ar",
            &WHISPER_SAMPLE_RATE.to_string(),
            "-y",
        ])
        .arg(wav_path)
        .output()
        .map_err(ffmpeg_spawn_error)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::AudioExtraction(format!("ffmpeg failed: {stderr}")));
    }

    Ok(())
}

/// Load an audio file and return 16kHz mono f32 samples ready for whisper.
///
/// ffmpeg handles decoding, resampling, and channel downmix in one shot.
/// Output is raw signed 16-bit little-endian PCM, converted to f32 here.
pub fn load_samples(path: &Path) -> Result<Vec<f32>> {
    if !path.exists() {
        return Err(Error::AudioExtraction(format!(
            "audio file not found: {}",
            path.display()
        )));
    }

    let output = Command::new("ffmpeg")
        .args(["-nostdin", "-threads", "0", "-i"])
        .arg(path)
        .args([
            "-f",
            "s16le",
            "-ac",
            "1",
            "-acodec",
            "pcm_s16le",
            "-ar",
            &WHISPER_SAMPLE_RATE.to_string(),
            "-",
        ])
        .output()
        .map_err(ffmpeg_spawn_error)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::AudioExtraction(format!("ffmpeg failed: {stderr}")));
    }

    if output.stdout.is_empty() {
        return Err(Error::AudioExtraction("ffmpeg produced no output".into()));
    }

    let samples: Vec<f32> = output
        .stdout
        .chunks_exact(2)
        .map(|chunk| {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            sample as f32 / 32768.0
        })
        .collect();

    let duration = samples.len() as f64 / WHISPER_SAMPLE_RATE as f64;
    debug!(
        samples = samples.len(),
        duration_secs = format!("{duration:.1}"),
        "decoded audio"
    );

    Ok(samples)
}

fn ffmpeg_spawn_error(e: std::io::Error) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::AudioExtraction("ffmpeg not found — install with: apt install ffmpeg".into())
    } else {
        Error::AudioExtraction(format!("failed to run ffmpeg: {e}"))
    }
}
