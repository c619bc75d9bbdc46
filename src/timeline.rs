use std::path::PathBuf;

use crate::duration::estimate_duration;
use crate::script_parser::DialogueLine;
use crate::timecode::frames_for_duration;

// @module: Timeline assembly from dialogues and audio artifacts

// @struct: One dialogue line placed on the timeline
#[derive(Debug, Clone)]
pub struct TimelineClip {
    // @field: The dialogue this clip renders
    pub dialogue: DialogueLine,

    // @field: Matching audio file, if the producer supplied one
    pub audio_path: Option<PathBuf>,

    // @field: Clip length in seconds, always positive
    pub duration_seconds: f64,
}

impl TimelineClip {
    /// Clip length in whole frames at the given rate
    pub fn duration_frames(&self, fps: u32) -> u64 {
        frames_for_duration(self.duration_seconds, fps)
    }
}

/// Absolute frame placement of one clip, derived from its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSpan {
    /// First frame of the clip
    pub start_frame: u64,
    /// One past the last frame of the clip
    pub end_frame: u64,
}

/// The ordered clip sequence for one generation run.
///
/// Clip order is always exactly the parsed dialogue order; start and end
/// frames are derived from position on demand, never cached, so the sequence
/// stays the single source of truth for ordering.
#[derive(Debug, Default)]
pub struct Timeline {
    /// Clips in playback order, one per dialogue line
    pub clips: Vec<TimelineClip>,
}

impl Timeline {
    /// Pair dialogues with audio artifacts by ordinal position and estimate
    /// each clip's duration.
    ///
    /// Precondition: `audio_files` is already sorted to match dialogue order
    /// (the producer names files by script index). A shorter artifact list
    /// leaves trailing clips without audio; extra artifacts are ignored.
    /// Correspondence is positional only, never inferred from file names.
    pub fn assemble(dialogues: Vec<DialogueLine>, audio_files: &[PathBuf]) -> Self {
        let clips = dialogues
            .into_iter()
            .enumerate()
            .map(|(index, dialogue)| {
                let audio_path = audio_files.get(index).cloned();
                let duration_seconds = estimate_duration(&dialogue, audio_path.as_deref());
                TimelineClip {
                    dialogue,
                    audio_path,
                    duration_seconds,
                }
            })
            .collect();
        Timeline { clips }
    }

    /// Number of clips on the timeline - used by tests and external consumers
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the timeline holds no clips
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Absolute frame spans for every clip, laid back-to-back from frame zero.
    ///
    /// Clip `i` starts where clip `i - 1` ends; there are no gaps or
    /// overlaps, so a changed duration shifts every later clip. Both
    /// serializer track passes must consume this one table to stay aligned.
    pub fn clip_spans(&self, fps: u32) -> Vec<ClipSpan> {
        let mut spans = Vec::with_capacity(self.clips.len());
        let mut current_frame = 0u64;
        for clip in &self.clips {
            let duration = clip.duration_frames(fps);
            spans.push(ClipSpan {
                start_frame: current_frame,
                end_frame: current_frame + duration,
            });
            current_frame += duration;
        }
        spans
    }
}
