use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use tempfile::NamedTempFile;
use tokio::process::Command;

use crate::app_config::{SynthesisConfig, VoicePreset};
use crate::errors::SynthesisError;
use crate::script_parser::DialogueLine;
use crate::synthesis::AudioProducer;

// @module: Voice clip generation via external command templates

/// Generate voice clips via the user supplied AquesTalk command templates
#[derive(Debug)]
pub struct AquesTalkProducer {
    // @field: Directory the clips are written into
    output_dir: PathBuf,

    // @field: Presets indexed by speaker label
    presets: HashMap<String, VoicePreset>,

    // @field: Per-command timeout in seconds
    timeout_secs: u64,
}

impl AquesTalkProducer {
    // @creates: Producer from the synthesis section of the configuration
    pub fn from_config<P: AsRef<Path>>(output_dir: P, config: &SynthesisConfig) -> Self {
        let presets = config
            .presets
            .iter()
            .map(|preset| (preset.speaker.clone(), preset.clone()))
            .collect();
        AquesTalkProducer {
            output_dir: output_dir.as_ref().to_path_buf(),
            presets,
            timeout_secs: config.timeout_secs,
        }
    }

    /// Directory the clips are written into
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Synthesize every dialogue line in script order.
    ///
    /// Output files are named `{sequence:04}_{speaker}.wav` with a 1-based
    /// sequence number, so a lexicographic sort of the directory reproduces
    /// script order for the positional pairing downstream. Fails on the
    /// first line whose speaker has no preset or whose command fails; no
    /// retries.
    pub async fn synthesize_all(
        &self,
        dialogues: &[DialogueLine],
    ) -> Result<Vec<PathBuf>, SynthesisError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut generated = Vec::with_capacity(dialogues.len());
        for (index, dialogue) in dialogues.iter().enumerate() {
            generated.push(self.produce(index + 1, dialogue).await?);
        }
        Ok(generated)
    }

    async fn run_command(
        &self,
        speaker: &str,
        args: &[String],
    ) -> Result<(), SynthesisError> {
        let Some((program, rest)) = args.split_first() else {
            return Err(SynthesisError::CommandFailed {
                speaker: speaker.to_string(),
                detail: "empty command template".to_string(),
            });
        };

        debug!("Running synthesis command for {:?}: {:?}", speaker, args);

        let output_future = Command::new(program).args(rest).output();
        let timeout = Duration::from_secs(self.timeout_secs);

        let output = tokio::select! {
            result = output_future => {
                result.map_err(|err| SynthesisError::CommandFailed {
                    speaker: speaker.to_string(),
                    detail: format!("failed to execute {:?}: {}", program, err),
                })?
            },
            _ = tokio::time::sleep(timeout) => {
                return Err(SynthesisError::Timeout {
                    speaker: speaker.to_string(),
                    timeout_secs: self.timeout_secs,
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Synthesis command for {:?} failed: {}", speaker, stderr.trim());
            return Err(SynthesisError::CommandFailed {
                speaker: speaker.to_string(),
                detail: format!("{:?} exited with {}", args, output.status),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl AudioProducer for AquesTalkProducer {
    async fn produce(
        &self,
        sequence: usize,
        dialogue: &DialogueLine,
    ) -> Result<PathBuf, SynthesisError> {
        let speaker = dialogue.normalized_speaker();
        let preset = self
            .presets
            .get(&speaker)
            .ok_or_else(|| SynthesisError::MissingPreset {
                speaker: speaker.clone(),
            })?;

        let output_path = self
            .output_dir
            .join(format!("{:04}_{}.wav", sequence, preset.speaker));

        // The temp file must outlive the command; dropping it afterwards
        // removes it from disk.
        let (args, _text_file) = expand_command(preset, &dialogue.normalized_text(), &output_path)?;
        self.run_command(&speaker, &args).await?;

        Ok(output_path)
    }
}

/// Expand a preset's command template for one dialogue line.
///
/// The template is tokenized first and placeholders are substituted per
/// token, so substituted values containing whitespace remain single
/// arguments. Returns the argument vector and, when the preset routes text
/// through a file, the temporary file keeping that text alive.
pub fn expand_command(
    preset: &VoicePreset,
    text: &str,
    output_path: &Path,
) -> Result<(Vec<String>, Option<NamedTempFile>), SynthesisError> {
    let tokens = shell_words::split(&preset.command_template).map_err(|err| {
        SynthesisError::CommandFailed {
            speaker: preset.speaker.clone(),
            detail: format!("invalid command template: {}", err),
        }
    })?;

    let text_file = if preset.use_text_file {
        Some(write_text_file(preset, text)?)
    } else {
        None
    };
    let text_file_path = text_file
        .as_ref()
        .map(|file| file.path().to_string_lossy().into_owned())
        .unwrap_or_default();

    let replacements = [
        ("{text}", text.to_string()),
        ("{speaker}", preset.speaker.clone()),
        ("{voice_id}", preset.voice_id.clone().unwrap_or_default()),
        (
            "{speed}",
            preset.speed.map(|v| v.to_string()).unwrap_or_default(),
        ),
        (
            "{volume}",
            preset.volume.map(|v| v.to_string()).unwrap_or_default(),
        ),
        ("{output}", output_path.to_string_lossy().into_owned()),
        ("{text_file}", text_file_path),
    ];

    let args = tokens
        .into_iter()
        .map(|token| {
            replacements
                .iter()
                .fold(token, |arg, (placeholder, value)| {
                    arg.replace(placeholder, value)
                })
        })
        .collect();

    Ok((args, text_file))
}

/// Write the dialogue text to a temporary file in the preset's encoding
fn write_text_file(preset: &VoicePreset, text: &str) -> Result<NamedTempFile, SynthesisError> {
    // Unknown labels are rejected by Config::validate; fall back to UTF-8
    // for presets constructed without going through validation.
    let encoding = encoding_rs::Encoding::for_label(preset.text_file_encoding.as_bytes())
        .unwrap_or(encoding_rs::UTF_8);
    let (encoded, _, _) = encoding.encode(text);

    let mut file = tempfile::Builder::new()
        .suffix(&preset.text_file_suffix)
        .tempfile()?;
    file.write_all(&encoded)?;
    file.flush()?;
    Ok(file)
}
