//! Rendering a [`TranscriptionResult`] into the supported output formats.
//!
//! Rendering is pure: the same result and format always produce byte-identical
//! output (no clock, no randomness).

use serde::Serialize;

use crate::error::Result;
use crate::timestamp::subtitle_timestamp;
use crate::types::TranscriptionResult;

/// The supported output formats. Closed set — the renderer matches
/// exhaustively, so adding a format is a compile-time exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain UTF-8 text.
    Text,
    /// JSON with per-segment timestamps.
    Json,
    /// SRT subtitles.
    Srt,
    /// WebVTT subtitles.
    Vtt,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
        }
    }

    /// All formats, in the order they are produced by `--format all`.
    pub fn all() -> [OutputFormat; 4] {
        [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Srt,
            OutputFormat::Vtt,
        ]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Render a transcription result in the given format.
pub fn render(result: &TranscriptionResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.text.clone()),
        OutputFormat::Json => to_json(result),
        OutputFormat::Srt => Ok(to_srt(result)),
        OutputFormat::Vtt => Ok(to_vtt(result)),
    }
}

/// JSON shape: key order is part of the format contract, and segments carry
/// only start/end/text — internal fields never leak into the output.
#[derive(Serialize)]
struct JsonTranscript<'a> {
    text: &'a str,
    language: &'a str,
    segments: Vec<JsonSegment<'a>>,
}

#[derive(Serialize)]
struct JsonSegment<'a> {
    start: f64,
    end: f64,
    text: &'a str,
}

fn to_json(result: &TranscriptionResult) -> Result<String> {
    let doc = JsonTranscript {
        text: &result.text,
        language: &result.language,
        segments: result
            .segments
            .iter()
            .map(|s| JsonSegment {
                start: s.start,
                end: s.end,
                text: &s.text,
            })
            .collect(),
    };
    // to_string_pretty: 2-space indent, non-ASCII left unescaped
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn to_srt(result: &TranscriptionResult) -> String {
    let mut out = String::new();
    for (i, seg) in result.segments.iter().enumerate() {
        out.push_str(&format!("{}\n", i + 1));
        out.push_str(&format!(
            "{} --> {}\n",
            subtitle_timestamp(seg.start),
            subtitle_timestamp(seg.end)
        ));
        out.push_str(seg.text.trim());
        out.push_str("\n\n");
    }
    out
}

fn to_vtt(result: &TranscriptionResult) -> String {
    let mut out = String::from("WEBVTT\n\n");
    for seg in &result.segments {
        out.push_str(&format!(
            "{} --> {}\n",
            subtitle_timestamp(seg.start),
            subtitle_timestamp(seg.end)
        ));
        out.push_str(seg.text.trim());
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn segment(start: f64, end: f64, text: &str) -> Segment {
        Segment {
            start,
            end,
            text: text.to_string(),
            no_speech_probability: 0.01,
        }
    }

    fn sample_result() -> TranscriptionResult {
        TranscriptionResult {
            text: "hello world".to_string(),
            language: "en".to_string(),
            segments: vec![segment(0.0, 1.2, " hello "), segment(1.2, 2.5, " world ")],
            elapsed_seconds: 4.2,
        }
    }

    #[test]
    fn test_text_is_verbatim() {
        let mut result = sample_result();
        result.text = "line one\nline two\n".to_string();
        assert_eq!(
            render(&result, OutputFormat::Text).unwrap(),
            "line one\nline two\n"
        );
    }

    #[test]
    fn test_srt_exact_output() {
        let rendered = render(&sample_result(), OutputFormat::Srt).unwrap();
        assert_eq!(
            rendered,
            "1\n00:00:00,000 --> 00:00:01,200\nhello\n\n\
             2\n00:00:01,200 --> 00:00:02,500\nworld\n\n"
        );
    }

    #[test]
    fn test_srt_indices_contiguous_despite_gaps() {
        let result = TranscriptionResult {
            text: String::new(),
            language: "en".to_string(),
            segments: vec![
                segment(0.0, 1.0, "a"),
                segment(100.0, 101.0, "b"),
                segment(500.0, 502.0, "c"),
            ],
            elapsed_seconds: 0.0,
        };
        let rendered = render(&result, OutputFormat::Srt).unwrap();
        let indices: Vec<&str> = rendered
            .split("\n\n")
            .filter(|block| !block.is_empty())
            .map(|block| block.lines().next().unwrap())
            .collect();
        assert_eq!(indices, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_vtt_header_and_no_indices() {
        let rendered = render(&sample_result(), OutputFormat::Vtt).unwrap();
        assert!(rendered.starts_with("WEBVTT\n\n"));
        assert!(!rendered
            .lines()
            .any(|line| line.chars().all(|c| c.is_ascii_digit()) && !line.is_empty()));
        assert!(rendered.contains("00:00:00,000 --> 00:00:01,200\nhello\n"));
    }

    #[test]
    fn test_json_round_trip_drops_internal_fields() {
        let result = sample_result();
        let rendered = render(&result, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed["text"], "hello world");
        assert_eq!(parsed["language"], "en");
        let segments = parsed["segments"].as_array().unwrap();
        assert_eq!(segments.len(), result.segments.len());
        for (json_seg, seg) in segments.iter().zip(&result.segments) {
            assert_eq!(json_seg["start"].as_f64().unwrap(), seg.start);
            assert_eq!(json_seg["end"].as_f64().unwrap(), seg.end);
            assert_eq!(json_seg["text"].as_str().unwrap(), seg.text);
            let keys: Vec<&String> = json_seg.as_object().unwrap().keys().collect();
            assert_eq!(keys, vec!["end", "start", "text"]);
        }
    }

    #[test]
    fn test_json_two_space_indent_and_key_order() {
        let rendered = render(&sample_result(), OutputFormat::Json).unwrap();
        assert!(rendered.starts_with("{\n  \"text\""));
        let text_pos = rendered.find("\"text\"").unwrap();
        let lang_pos = rendered.find("\"language\"").unwrap();
        let seg_pos = rendered.find("\"segments\"").unwrap();
        assert!(text_pos < lang_pos && lang_pos < seg_pos);
    }

    #[test]
    fn test_json_preserves_non_ascii_unescaped() {
        let mut result = sample_result();
        result.text = "café über 日本語".to_string();
        result.segments[0].text = "café".to_string();
        let rendered = render(&result, OutputFormat::Json).unwrap();
        assert!(rendered.contains("café über 日本語"));
        assert!(!rendered.contains("\\u"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let result = sample_result();
        for format in OutputFormat::all() {
            let first = render(&result, format).unwrap();
            let second = render(&result, format).unwrap();
            assert_eq!(first.as_bytes(), second.as_bytes(), "format {format}");
        }
    }

    #[test]
    fn test_empty_segments() {
        let result = TranscriptionResult {
            text: String::new(),
            language: "en".to_string(),
            segments: Vec::new(),
            elapsed_seconds: 0.0,
        };
        assert_eq!(render(&result, OutputFormat::Srt).unwrap(), "");
        assert_eq!(render(&result, OutputFormat::Vtt).unwrap(), "WEBVTT\n\n");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Text.extension(), "txt");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Srt.extension(), "srt");
        assert_eq!(OutputFormat::Vtt.extension(), "vtt");
    }
}
