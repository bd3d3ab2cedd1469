//! videoscribe — video in, transcript out.
//!
//! Turns a local video file or YouTube URL into a text transcript by
//! extracting the audio track and running it through a local whisper model,
//! then rendering the result as plain text, timed JSON, SRT, or WebVTT.

pub mod acquire;
pub mod audio;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod paths;
pub mod timestamp;
pub mod transcribe;
pub mod types;

pub use config::{Language, TranscribeOptions};
pub use error::{Error, Result};
pub use format::{render, OutputFormat};
pub use model::ModelSize;
pub use types::{Segment, TranscriptionResult};

pub use transcribe::transcribe;
