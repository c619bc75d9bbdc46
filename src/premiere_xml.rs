use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::duration::DEFAULT_AUDIO_SAMPLE_RATE;
use crate::timecode::{timecode_at, DEFAULT_FRAME_RATE};
use crate::timeline::Timeline;

// @module: xmeml interchange document serialization

/// Style applied to speakers without a dedicated entry in the style table
const DEFAULT_CAPTION_STYLE: &str = "デフォルト字幕";

// @const: Closed speaker-to-style decision table; unknown speakers always
// fall through to the default style
static SPEAKER_STYLES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("霊夢", "リンクスタイル霊夢"),
        ("魔理沙", "リンクスタイル魔理沙"),
    ])
});

/// Caption style identifier for a normalized speaker label
pub fn style_for_speaker(speaker: &str) -> &'static str {
    SPEAKER_STYLES
        .get(speaker)
        .copied()
        .unwrap_or(DEFAULT_CAPTION_STYLE)
}

/// Escape the five XML predefined entities.
///
/// Applied exactly once, at the point of insertion; callers must never pass
/// already-escaped text.
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Construct a minimal Final Cut XML document that Premiere Pro can import.
///
/// The sequence carries two tracks over the same clip table: a video track
/// with one caption generator item per clip, and an audio track with one
/// clip item per clip that has an audio artifact.
#[derive(Debug, Clone)]
pub struct PremiereXmlBuilder {
    // @field: Sequence frame rate, used for all timecode math
    fps: u32,

    // @field: Sample rate written into audio file blocks
    audio_sample_rate: u32,
}

impl Default for PremiereXmlBuilder {
    fn default() -> Self {
        PremiereXmlBuilder {
            fps: DEFAULT_FRAME_RATE,
            audio_sample_rate: DEFAULT_AUDIO_SAMPLE_RATE,
        }
    }
}

impl PremiereXmlBuilder {
    // @creates: Builder with explicit rates
    pub fn new(fps: u32, audio_sample_rate: u32) -> Self {
        PremiereXmlBuilder {
            fps,
            audio_sample_rate,
        }
    }

    /// Render the timeline as a two-track xmeml v5 document.
    ///
    /// Both track passes consume the same precomputed clip spans, so clips
    /// without audio still advance the cumulative offset on the audio track
    /// even though they emit nothing there.
    pub fn build_xml(&self, project_name: &str, timeline: &Timeline) -> String {
        let fps = self.fps;
        let spans = timeline.clip_spans(fps);
        let mut xml = String::new();

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<!DOCTYPE xmeml>\n");
        xml.push_str("<xmeml version=\"5\">\n");
        xml.push_str("  <sequence id=\"sequence-1\">\n");
        let _ = writeln!(xml, "    <name>{}</name>", escape_xml(project_name));
        xml.push_str("    <duration>0</duration>\n");
        xml.push_str("    <rate>\n");
        let _ = writeln!(xml, "      <timebase>{}</timebase>", fps);
        xml.push_str("      <ntsc>FALSE</ntsc>\n");
        xml.push_str("    </rate>\n");
        xml.push_str("    <media>\n");
        xml.push_str("      <video>\n");
        xml.push_str("        <format>\n");
        xml.push_str("          <samplecharacteristics>\n");
        let _ = writeln!(
            xml,
            "            <rate><timebase>{}</timebase><ntsc>FALSE</ntsc></rate>",
            fps
        );
        xml.push_str("            <width>1920</width>\n");
        xml.push_str("            <height>1080</height>\n");
        xml.push_str("            <anamorphic>FALSE</anamorphic>\n");
        xml.push_str("            <pixelaspectratio>square</pixelaspectratio>\n");
        xml.push_str("          </samplecharacteristics>\n");
        xml.push_str("        </format>\n");
        xml.push_str("        <track>\n");

        for (index, (clip, span)) in timeline.clips.iter().zip(&spans).enumerate() {
            let start_tc = timecode_at(span.start_frame, fps);
            let end_tc = timecode_at(span.end_frame, fps);
            let speaker = clip.dialogue.normalized_speaker();
            let caption = format!("{}: {}", speaker, clip.dialogue.normalized_text());

            let _ = writeln!(xml, "          <generatoritem id=\"title-{}\">", index + 1);
            let _ = writeln!(xml, "            <name>{} Subtitle</name>", escape_xml(&speaker));
            xml.push_str("            <generatoritemtype>text</generatoritemtype>\n");
            xml.push_str("            <rate>\n");
            let _ = writeln!(xml, "              <timebase>{}</timebase>", fps);
            xml.push_str("              <ntsc>FALSE</ntsc>\n");
            xml.push_str("            </rate>\n");
            let _ = writeln!(xml, "            <start>{}</start>", start_tc);
            let _ = writeln!(xml, "            <end>{}</end>", end_tc);
            let _ = writeln!(xml, "            <in>{}</in>", start_tc);
            let _ = writeln!(xml, "            <out>{}</out>", end_tc);
            xml.push_str("            <alphatype>straight</alphatype>\n");
            xml.push_str("            <effect>\n");
            xml.push_str("              <name>Text</name>\n");
            xml.push_str("              <effectid>text</effectid>\n");
            xml.push_str("              <effectcategory>Text</effectcategory>\n");
            xml.push_str("              <effecttype>text</effecttype>\n");
            xml.push_str("              <mediatype>video</mediatype>\n");
            xml.push_str("              <parameter authoringApp=\"PremierePro\">\n");
            xml.push_str("                <parameterid>str</parameterid>\n");
            xml.push_str("                <name>テキスト</name>\n");
            let _ = writeln!(xml, "                <value>{}</value>", escape_xml(&caption));
            xml.push_str("              </parameter>\n");
            xml.push_str("              <parameter authoringApp=\"PremierePro\">\n");
            xml.push_str("                <parameterid>style</parameterid>\n");
            xml.push_str("                <name>スタイル</name>\n");
            let _ = writeln!(
                xml,
                "                <value>{}</value>",
                style_for_speaker(&speaker)
            );
            xml.push_str("              </parameter>\n");
            xml.push_str("            </effect>\n");
            xml.push_str("          </generatoritem>\n");
        }

        xml.push_str("        </track>\n");
        xml.push_str("      </video>\n");
        xml.push_str("      <audio>\n");
        xml.push_str("        <track>\n");

        for (index, (clip, span)) in timeline.clips.iter().zip(&spans).enumerate() {
            let Some(audio_path) = clip.audio_path.as_deref() else {
                // No artifact: nothing on the audio track, but the span
                // table already accounts for the clip's frames.
                continue;
            };
            let start_tc = timecode_at(span.start_frame, fps);
            let end_tc = timecode_at(span.end_frame, fps);

            let _ = writeln!(xml, "          <clipitem id=\"audio-{}\">", index + 1);
            let _ = writeln!(
                xml,
                "            <name>{}</name>",
                escape_xml(&file_stem(audio_path))
            );
            let _ = writeln!(xml, "            <start>{}</start>", start_tc);
            let _ = writeln!(xml, "            <end>{}</end>", end_tc);
            let _ = writeln!(xml, "            <in>{}</in>", start_tc);
            let _ = writeln!(xml, "            <out>{}</out>", end_tc);
            xml.push_str("            <file>\n");
            let _ = writeln!(
                xml,
                "              <name>{}</name>",
                escape_xml(&file_name(audio_path))
            );
            let _ = writeln!(
                xml,
                "              <pathurl>file://{}</pathurl>",
                escape_xml(&absolute_path_string(audio_path))
            );
            xml.push_str("              <rate>\n");
            let _ = writeln!(
                xml,
                "                <timebase>{}</timebase>",
                self.audio_sample_rate
            );
            xml.push_str("                <ntsc>FALSE</ntsc>\n");
            xml.push_str("              </rate>\n");
            xml.push_str("            </file>\n");
            xml.push_str("          </clipitem>\n");
        }

        xml.push_str("        </track>\n");
        xml.push_str("      </audio>\n");
        xml.push_str("    </media>\n");
        xml.push_str("  </sequence>\n");
        xml.push_str("</xmeml>");

        xml
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn absolute_path_string(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}
