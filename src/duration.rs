use std::path::Path;

use anyhow::Result;
use log::debug;

use crate::script_parser::DialogueLine;

// @module: Per-line duration estimation

/// Sample rate assumed when a WAV header reports none
pub const DEFAULT_AUDIO_SAMPLE_RATE: u32 = 44100;

/// Floor for durations measured from audio metadata, guarding against
/// zero-length or corrupt files
const MIN_MEASURED_SECONDS: f64 = 0.1;

// Heuristic fallback: 0.18 seconds per character + 0.6 buffer, never below 1.2
const SECONDS_PER_CHAR: f64 = 0.18;
const HEURISTIC_PADDING: f64 = 0.6;
const MIN_ESTIMATED_SECONDS: f64 = 1.2;

/// Read `(sample_count, sample_rate)` from a WAV file header.
///
/// The sample count is per channel, which is what the duration math needs.
pub fn read_wav_metadata<P: AsRef<Path>>(path: P) -> Result<(u32, u32)> {
    let reader = hound::WavReader::open(path.as_ref())?;
    let sample_rate = reader.spec().sample_rate;
    Ok((reader.duration(), sample_rate))
}

/// Duration in seconds for a known sample count and rate.
///
/// A reported rate of zero falls back to the default so corrupt headers
/// cannot divide by zero.
pub fn measured_duration(sample_count: u32, sample_rate: u32) -> f64 {
    let rate = if sample_rate == 0 {
        DEFAULT_AUDIO_SAMPLE_RATE
    } else {
        sample_rate
    };
    (f64::from(sample_count) / f64::from(rate)).max(MIN_MEASURED_SECONDS)
}

/// Heuristic duration from the normalized dialogue text alone.
///
/// Deterministic given only the text, so timelines remain reproducible
/// without any audio fixture.
pub fn estimate_from_text(dialogue: &DialogueLine) -> f64 {
    let char_count = dialogue.normalized_text().chars().count();
    (char_count as f64 * SECONDS_PER_CHAR + HEURISTIC_PADDING).max(MIN_ESTIMATED_SECONDS)
}

/// Estimate the duration of one dialogue line, preferring real audio metadata.
///
/// A missing artifact, missing file, or unreadable header degrades to the
/// text heuristic; metadata failures never abort a generation run.
pub fn estimate_duration(dialogue: &DialogueLine, audio_path: Option<&Path>) -> f64 {
    if let Some(path) = audio_path {
        match read_wav_metadata(path) {
            Ok((sample_count, sample_rate)) => {
                return measured_duration(sample_count, sample_rate);
            }
            Err(err) => {
                debug!(
                    "Unreadable audio metadata for {}, falling back to text estimate: {}",
                    path.display(),
                    err
                );
            }
        }
    }
    estimate_from_text(dialogue)
}
