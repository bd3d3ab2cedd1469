//! The transcription driver: loads the requested whisper model, runs
//! inference on a waveform file, and packages the raw result into a
//! [`TranscriptionResult`].

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio;
use crate::config::{Language, TranscribeOptions};
use crate::error::{Error, Result};
use crate::model;
use crate::types::{Segment, TranscriptionResult};

/// Transcribe a waveform file.
///
/// Ensures the model is available (downloading on first use), decodes the
/// audio to 16kHz mono samples, and runs whisper. Wall-clock time is measured
/// around the inference call only and stored in `elapsed_seconds`. Any
/// failure (missing model, corrupt audio, inference error) is fatal; there is
/// no retry.
pub async fn transcribe(
    audio_path: &Path,
    options: &TranscribeOptions,
) -> Result<TranscriptionResult> {
    let cache_dir = options.resolve_cache_dir();
    let model_path = model::ensure_model(options.model, &cache_dir).await?;

    let samples = audio::load_samples(audio_path)?;

    let (segments, language, elapsed_seconds) = run_whisper(&samples, &model_path, options)?;

    let text = segments
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ");

    info!(
        segments = segments.len(),
        %language,
        elapsed_secs = format!("{elapsed_seconds:.1}"),
        "transcription complete"
    );

    Ok(TranscriptionResult {
        text,
        language,
        segments,
        elapsed_seconds,
    })
}

/// Run a closure and return its result with the wall-clock seconds spent
/// inside it. The clock covers the closure only.
fn timed<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed().as_secs_f64())
}

/// Run whisper.cpp on 16kHz mono f32 samples.
/// Returns the segments, the detected (or hinted) language code, and the
/// wall-clock seconds spent in inference. Model load and segment read-back
/// are outside the timed window.
fn run_whisper(
    samples: &[f32],
    model_path: &Path,
    options: &TranscribeOptions,
) -> Result<(Vec<Segment>, String, f64)> {
    info!(model = %model_path.display(), "loading whisper model");

    let ctx_params = WhisperContextParameters::new();
    let ctx = WhisperContext::new_with_params(
        model_path
            .to_str()
            .ok_or_else(|| Error::Model("model path contains invalid UTF-8".into()))?,
        ctx_params,
    )?;

    let mut state = ctx.create_state()?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 5 });

    // Language hint passes through unchanged; absent means auto-detect
    match &options.language {
        Language::Auto => params.set_detect_language(true),
        Language::Code { code, .. } => params.set_language(Some(code)),
    }

    // Disable stderr printing from whisper.cpp
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    info!(samples = samples.len(), "running transcription");
    let (full_result, elapsed_seconds) = timed(|| state.full(params, samples));
    full_result?;

    let num_segments = state.full_n_segments();
    debug!(num_segments, "inference done");

    let mut segments = Vec::with_capacity(num_segments as usize);

    for i in 0..num_segments {
        let segment = state
            .get_segment(i)
            .ok_or_else(|| Error::Transcription(format!("segment {i} not found")))?;

        let start = segment.start_timestamp() as f64 / 100.0;
        let end = segment.end_timestamp() as f64 / 100.0;
        let text = segment
            .to_str_lossy()
            .map_err(|e| Error::Transcription(format!("segment text error: {e}")))?
            .into_owned();

        debug_assert!(0.0 <= start && start <= end, "segment {i} out of order");

        segments.push(Segment {
            start,
            end,
            text,
            no_speech_probability: segment.no_speech_probability(),
        });
    }

    // Detected language from whisper state; the hint comes back unchanged
    let language = match &options.language {
        Language::Code { code, .. } => code.clone(),
        Language::Auto => {
            let lang_id = state.full_lang_id_from_state();
            whisper_rs::get_lang_str(lang_id)
                .unwrap_or("unknown")
                .to_string()
        }
    };

    Ok((segments, language, elapsed_seconds))
}
