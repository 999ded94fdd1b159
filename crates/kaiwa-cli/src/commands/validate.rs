//! The `kaiwa validate` command.

use std::path::PathBuf;

use anyhow::Result;

use kaiwa_core::transcript;

pub fn execute(transcript_path: PathBuf) -> Result<()> {
    let transcripts = if transcript_path.is_dir() {
        transcript::load_transcript_directory(&transcript_path)?
    } else {
        vec![transcript::parse_transcript(&transcript_path)?]
    };

    let mut total_warnings = 0;

    for t in &transcripts {
        println!("Transcript: {} ({} messages)", t.name, t.messages.len());

        let warnings = transcript::validate_transcript(t);
        for w in &warnings {
            let prefix = w
                .message_index
                .map(|i| format!("  [message {i}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    for w in transcript::validate_transcript_set(&transcripts) {
        println!("  WARNING: {}", w.message);
        total_warnings += 1;
    }

    if total_warnings == 0 {
        println!("All transcripts valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
