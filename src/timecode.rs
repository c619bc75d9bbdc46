// @module: Frame-accurate timecode math

/// Default sequence frame rate, non-drop-frame
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Convert a duration in seconds to a whole number of frames.
///
/// Rounding is pinned to round-half-away-from-zero (`f64::round`), so a
/// duration of exactly 1.5 frames becomes 2 frames.
pub fn frames_for_duration(seconds: f64, fps: u32) -> u64 {
    debug_assert!(seconds >= 0.0, "negative duration reached the timecode engine");
    (seconds * f64::from(fps)).round() as u64
}

/// Format an absolute frame offset as an `HH:MM:SS:FF` timecode.
///
/// The frame remainder is taken at the same fps used for the whole-second
/// decomposition, so it always lies in `[0, fps)`. The caller must pass the
/// sequence's declared fps here; formatting at any other rate would drift
/// against the sequence and is a configuration bug, not a runtime condition.
pub fn timecode_at(frame_offset: u64, fps: u32) -> String {
    debug_assert!(fps > 0, "frame rate must be positive");
    let fps = u64::from(fps);

    let total_seconds = frame_offset / fps;
    let frames = frame_offset % fps;

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
}
