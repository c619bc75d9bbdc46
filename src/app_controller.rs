use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::premiere_xml::PremiereXmlBuilder;
use crate::script_parser::ScriptParser;
use crate::synthesis::AquesTalkProducer;
use crate::timeline::Timeline;

// @module: Application controller for timeline generation

/// Main application controller for script-to-timeline generation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.project_name.trim().is_empty() && self.config.fps > 0
    }

    /// Run the full generation workflow: parse the script, pair it with the
    /// voice clips found in the audio directory, and write the interchange
    /// XML document.
    ///
    /// Returns the path of the written XML file.
    pub async fn run_generate(&self, script_path: &Path, force_overwrite: bool) -> Result<PathBuf> {
        if !script_path.exists() {
            return Err(anyhow!("Script file does not exist: {:?}", script_path));
        }

        let output_path = self
            .config
            .xml_dir
            .join(format!("{}.xml", self.config.project_name));
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping, output already exists (use -f to force overwrite): {:?}",
                output_path
            );
            return Ok(output_path);
        }

        let dialogues = ScriptParser::new().parse_file(script_path)?;
        info!("Parsed {} dialogue lines from {:?}", dialogues.len(), script_path);

        let audio_files = self.collect_audio_files()?;
        if audio_files.len() < dialogues.len() {
            warn!(
                "Found {} voice clips for {} dialogue lines; missing clips fall back to estimated durations",
                audio_files.len(),
                dialogues.len()
            );
        }

        let timeline = Timeline::assemble(dialogues, &audio_files);
        let builder = PremiereXmlBuilder::new(self.config.fps, self.config.audio_sample_rate);
        let xml = builder.build_xml(&self.config.project_name, &timeline);

        FileManager::ensure_dir(&self.config.xml_dir)?;
        FileManager::write_to_file(&output_path, &xml)
            .context("Failed to write interchange XML")?;

        info!("Wrote interchange XML: {:?}", output_path);
        Ok(output_path)
    }

    /// Run the synthesis workflow: parse the script and produce one voice
    /// clip per dialogue line through the configured presets.
    pub async fn run_synthesize(&self, script_path: &Path) -> Result<Vec<PathBuf>> {
        if !script_path.exists() {
            return Err(anyhow!("Script file does not exist: {:?}", script_path));
        }

        let dialogues = ScriptParser::new().parse_file(script_path)?;
        info!("Parsed {} dialogue lines from {:?}", dialogues.len(), script_path);

        let producer = AquesTalkProducer::from_config(&self.config.audio_dir, &self.config.synthesis);
        let generated = producer
            .synthesize_all(&dialogues)
            .await
            .context("Voice synthesis failed")?;

        info!(
            "Generated {} voice clips in {:?}",
            generated.len(),
            producer.output_dir()
        );
        Ok(generated)
    }

    /// Voice clips available for pairing, sorted by path.
    ///
    /// A missing audio directory is not an error; generation then runs
    /// entirely on estimated durations.
    fn collect_audio_files(&self) -> Result<Vec<PathBuf>> {
        if !FileManager::dir_exists(&self.config.audio_dir) {
            debug!(
                "Audio directory {:?} does not exist, using estimated durations",
                self.config.audio_dir
            );
            return Ok(Vec::new());
        }
        FileManager::find_files(&self.config.audio_dir, "wav")
    }
}
