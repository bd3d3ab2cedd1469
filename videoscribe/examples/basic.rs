//! Transcribe a waveform file and print the text.
//!
//! Usage: cargo run --example basic -- path/to/audio.wav

use std::path::Path;

use videoscribe::TranscribeOptions;

#[tokio::main]
async fn main() -> videoscribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: basic <audio-file>");

    let result = videoscribe::transcribe(Path::new(&path), &TranscribeOptions::default()).await?;

    println!("{}", result.text);

    Ok(())
}
