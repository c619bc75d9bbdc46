use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::duration::DEFAULT_AUDIO_SAMPLE_RATE;
use crate::timecode::DEFAULT_FRAME_RATE;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Project name, used for the sequence and the output file name
    #[serde(default = "default_project_name")]
    pub project_name: String,

    /// Sequence frame rate (non-drop-frame)
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Sample rate written into audio file blocks
    #[serde(default = "default_audio_sample_rate")]
    pub audio_sample_rate: u32,

    /// Directory where voice clips are written and collected from
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,

    /// Directory the interchange XML is written into
    #[serde(default = "default_xml_dir")]
    pub xml_dir: PathBuf,

    /// Synthesis config
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Voice synthesis configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Timeout for one external synthesis command, in seconds
    #[serde(default = "default_synthesis_timeout_secs")]
    pub timeout_secs: u64,

    /// Per-speaker voice presets
    #[serde(default)]
    pub presets: Vec<VoicePreset>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            timeout_secs: default_synthesis_timeout_secs(),
            presets: Vec::new(),
        }
    }
}

/// Configuration describing how to synthesize audio for a specific speaker.
///
/// The command template is tokenized first and placeholders are substituted
/// per token, so values containing spaces stay single arguments. Supported
/// placeholders: `{text}`, `{speaker}`, `{voice_id}`, `{speed}`, `{volume}`,
/// `{output}`, `{text_file}`.
///
/// When `use_text_file` is enabled the dialogue text is written to a
/// temporary file using `text_file_encoding` and its path is provided via
/// the `{text_file}` placeholder, for command line tools that consume their
/// input from a file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoicePreset {
    // @field: Speaker label this preset matches
    pub speaker: String,

    // @field: Command template with placeholders
    pub command_template: String,

    // @field: Tool-specific voice identifier
    #[serde(default)]
    pub voice_id: Option<String>,

    // @field: Speech speed
    #[serde(default)]
    pub speed: Option<i32>,

    // @field: Output volume
    #[serde(default)]
    pub volume: Option<i32>,

    /// Pass the dialogue text through a temporary file instead of an argument
    #[serde(default)]
    pub use_text_file: bool,

    /// Encoding label for the temporary text file (e.g. "utf-8", "shift_jis")
    #[serde(default = "default_text_file_encoding")]
    pub text_file_encoding: String,

    /// Suffix for the temporary text file
    #[serde(default = "default_text_file_suffix")]
    pub text_file_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            project_name: default_project_name(),
            fps: default_fps(),
            audio_sample_rate: default_audio_sample_rate(),
            audio_dir: default_audio_dir(),
            xml_dir: default_xml_dir(),
            synthesis: SynthesisConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(anyhow!("Project name must not be empty"));
        }
        if self.fps == 0 {
            return Err(anyhow!("Frame rate must be positive"));
        }
        if self.audio_sample_rate == 0 {
            return Err(anyhow!("Audio sample rate must be positive"));
        }

        for preset in &self.synthesis.presets {
            if preset.speaker.trim().is_empty() {
                return Err(anyhow!("Voice preset with empty speaker label"));
            }
            if preset.command_template.trim().is_empty() {
                return Err(anyhow!(
                    "Voice preset for speaker {:?} has an empty command template",
                    preset.speaker
                ));
            }
            if encoding_rs::Encoding::for_label(preset.text_file_encoding.as_bytes()).is_none() {
                return Err(anyhow!(
                    "Voice preset for speaker {:?} has unknown text file encoding {:?}",
                    preset.speaker,
                    preset.text_file_encoding
                ));
            }
        }

        Ok(())
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_project_name() -> String {
    "YukkuriProject".to_string()
}

fn default_fps() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_audio_sample_rate() -> u32 {
    DEFAULT_AUDIO_SAMPLE_RATE
}

fn default_audio_dir() -> PathBuf {
    PathBuf::from("output/audio")
}

fn default_xml_dir() -> PathBuf {
    PathBuf::from("output/premiere")
}

fn default_synthesis_timeout_secs() -> u64 {
    60
}

fn default_text_file_encoding() -> String {
    "utf-8".to_string()
}

fn default_text_file_suffix() -> String {
    ".txt".to_string()
}
