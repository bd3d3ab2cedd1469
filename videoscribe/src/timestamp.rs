//! Timestamp formatting for subtitle cues and elapsed-time reporting.
//!
//! Both functions truncate — milliseconds never round up into the seconds
//! field, so `59.9996` renders as `00:00:59,999`, not `00:01:00,000`.
//! Negative input is a caller bug; segments are asserted non-negative where
//! they are produced.

/// Format seconds as a subtitle cue timestamp: `HH:MM:SS,mmm`.
///
/// Hours are zero-padded to at least 2 digits but may exceed 24.
pub fn subtitle_timestamp(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative timestamp: {seconds}");
    let total_ms = (seconds * 1000.0) as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Format seconds as a human-readable clock string: `H:MM:SS` (hours unpadded).
///
/// Used for elapsed-time reporting, not for subtitle files.
pub fn clock_time(seconds: f64) -> String {
    debug_assert!(seconds >= 0.0, "negative duration: {seconds}");
    let total = seconds as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h}:{m:02}:{s:02}")
}
