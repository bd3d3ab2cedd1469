/// A transcript segment (sentence/phrase) with timing.
///
/// Segments are produced in chronological order and are immutable once built.
/// Invariant: `0.0 <= start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Whisper's estimate that this span contains no speech.
    /// Internal detail — dropped from every rendered output format.
    pub no_speech_probability: f32,
}

/// Complete transcription result, built once per run and consumed read-only.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Full text (trimmed segment texts joined with spaces).
    pub text: String,
    /// Detected or hinted language code (e.g. "en").
    pub language: String,
    /// Timed segments in chronological order.
    pub segments: Vec<Segment>,
    /// Wall-clock time spent in model inference.
    pub elapsed_seconds: f64,
}
