//! Render a transcript as plain text, JSON, SRT, and WebVTT.
//!
//! Usage: cargo run --example formats -- path/to/audio.wav

use std::path::Path;

use videoscribe::{render, OutputFormat, TranscribeOptions};

#[tokio::main]
async fn main() -> videoscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: formats <audio-file>");

    let result = videoscribe::transcribe(Path::new(&path), &TranscribeOptions::default()).await?;

    for format in OutputFormat::all() {
        println!("=== {format} ===\n{}", render(&result, format)?);
    }

    Ok(())
}
