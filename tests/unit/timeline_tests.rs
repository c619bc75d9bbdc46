/*!
 * Tests for timeline assembly and clip placement
 */

use std::path::PathBuf;

use yukigen::script_parser::DialogueLine;
use yukigen::timeline::{Timeline, TimelineClip};

fn dialogue(speaker: &str, text: &str) -> DialogueLine {
    DialogueLine::new(speaker, text, None)
}

fn clip_with_duration(speaker: &str, seconds: f64, audio: Option<&str>) -> TimelineClip {
    TimelineClip {
        dialogue: dialogue(speaker, "text"),
        audio_path: audio.map(PathBuf::from),
        duration_seconds: seconds,
    }
}

/// Test positional pairing with fewer artifacts than dialogues
#[test]
fn test_assemble_withShortArtifactList_shouldLeaveTrailingClipsSilent() {
    let dialogues = vec![
        dialogue("霊夢", "一行目"),
        dialogue("魔理沙", "二行目"),
        dialogue("霊夢", "三行目"),
    ];
    let audio_files = vec![PathBuf::from("0001_霊夢.wav"), PathBuf::from("0002_魔理沙.wav")];

    let timeline = Timeline::assemble(dialogues, &audio_files);

    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline.clips[0].audio_path, Some(PathBuf::from("0001_霊夢.wav")));
    assert_eq!(timeline.clips[1].audio_path, Some(PathBuf::from("0002_魔理沙.wav")));
    assert_eq!(timeline.clips[2].audio_path, None);
}

/// Test that extra artifacts beyond the dialogue count are ignored
#[test]
fn test_assemble_withExtraArtifacts_shouldIgnoreThem() {
    let dialogues = vec![dialogue("霊夢", "一行目")];
    let audio_files = vec![
        PathBuf::from("0001.wav"),
        PathBuf::from("0002.wav"),
        PathBuf::from("0003.wav"),
    ];

    let timeline = Timeline::assemble(dialogues, &audio_files);

    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.clips[0].audio_path, Some(PathBuf::from("0001.wav")));
}

/// Test that assembly preserves dialogue order and positive durations
#[test]
fn test_assemble_withNoArtifacts_shouldKeepOrderAndEstimate() {
    let dialogues = vec![dialogue("Ａ", "one"), dialogue("Ｂ", "two"), dialogue("Ｃ", "three")];
    let timeline = Timeline::assemble(dialogues, &[]);

    let speakers: Vec<String> = timeline
        .clips
        .iter()
        .map(|c| c.dialogue.speaker.clone())
        .collect();
    assert_eq!(speakers, vec!["Ａ", "Ｂ", "Ｃ"]);
    assert!(timeline.clips.iter().all(|c| c.duration_seconds > 0.0));
    assert!(timeline.clips.iter().all(|c| c.audio_path.is_none()));
}

/// Test that an empty script yields an empty timeline
#[test]
fn test_assemble_withNoDialogues_shouldBeEmpty() {
    let timeline = Timeline::assemble(Vec::new(), &[]);
    assert!(timeline.is_empty());
    assert!(timeline.clip_spans(30).is_empty());
}

/// Test back-to-back spans with known frame durations
#[test]
fn test_clip_spans_withKnownDurations_shouldLayClipsBackToBack() {
    let timeline = Timeline {
        clips: vec![
            clip_with_duration("霊夢", 1.0, Some("a.wav")),
            clip_with_duration("魔理沙", 1.5, None),
            clip_with_duration("霊夢", 0.5, Some("b.wav")),
        ],
    };

    let spans = timeline.clip_spans(30);
    assert_eq!(spans.len(), 3);
    assert_eq!((spans[0].start_frame, spans[0].end_frame), (0, 30));
    assert_eq!((spans[1].start_frame, spans[1].end_frame), (30, 75));
    assert_eq!((spans[2].start_frame, spans[2].end_frame), (75, 90));
}

/// Test that duration frames follow the pinned rounding
#[test]
fn test_duration_frames_withFractionalSeconds_shouldRound() {
    let clip = clip_with_duration("霊夢", 1.25, None);
    // 1.25s at 2 fps is exactly 2.5 frames
    assert_eq!(clip.duration_frames(2), 3);
    assert_eq!(clip.duration_frames(30), 38);
}
