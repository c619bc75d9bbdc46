// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::Controller;

mod app_config;
mod app_controller;
mod duration;
mod errors;
mod file_utils;
mod premiere_xml;
mod script_parser;
mod synthesis;
mod timecode;
mod timeline;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the interchange XML timeline from a script (default command)
    #[command(alias = "generate")]
    Gen(GenerateArgs),

    /// Synthesize voice clips for every line of a script
    Synth(SynthArgs),

    /// Generate shell completions for yukigen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Script file to compile
    #[arg(value_name = "SCRIPT")]
    script_path: PathBuf,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Project name, used for the sequence and output file name
    #[arg(short, long)]
    project_name: Option<String>,

    /// Sequence frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Directory the voice clips are collected from
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Directory the XML document is written into
    #[arg(long)]
    xml_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
struct SynthArgs {
    /// Script file to synthesize
    #[arg(value_name = "SCRIPT")]
    script_path: PathBuf,

    /// Directory the voice clips are written into
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// yukigen - Yukkuri timeline generator
///
/// Compiles a dialogue script into a Premiere-importable XML timeline,
/// pairing each line with a synthesized voice clip.
#[derive(Parser, Debug)]
#[command(name = "yukigen")]
#[command(version = "0.1.0")]
#[command(about = "Script-to-timeline generator for narrated video")]
#[command(long_about = "yukigen parses a dialogue script, estimates or measures per-line durations
from the synthesized voice clips, and writes a two-track Premiere-importable
XML timeline.

EXAMPLES:
    yukigen script.txt                        # Generate XML using default config
    yukigen -f script.txt                     # Force overwrite the existing XML
    yukigen -p MyShow --fps 24 script.txt     # Override project name and frame rate
    yukigen synth script.txt                  # Synthesize voice clips only
    yukigen completions bash > yukigen.bash   # Generate bash completions

SCRIPT FORMAT:
    - <label>        section marker, labels all following lines
    <speaker>\u{3000}<text>  dialogue line, split at the first fullwidth space
    blank lines are ignored; anything else fails the parse

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config. If the config file doesn't exist, a default
    one will be created automatically. Voice presets (one per speaker) define
    the external synthesis command templates.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script file to compile
    #[arg(value_name = "SCRIPT")]
    script_path: Option<PathBuf>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Project name, used for the sequence and output file name
    #[arg(short, long)]
    project_name: Option<String>,

    /// Sequence frame rate
    #[arg(long)]
    fps: Option<u32>,

    /// Directory the voice clips are collected from
    #[arg(long)]
    audio_dir: Option<PathBuf>,

    /// Directory the XML document is written into
    #[arg(long)]
    xml_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "yukigen", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Gen(args)) => run_generate(args).await,
        Some(Commands::Synth(args)) => run_synthesize(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let script_path = cli.script_path.ok_or_else(|| {
                anyhow::anyhow!("SCRIPT is required when no subcommand is specified")
            })?;

            let generate_args = GenerateArgs {
                script_path,
                force_overwrite: cli.force_overwrite,
                project_name: cli.project_name,
                fps: cli.fps,
                audio_dir: cli.audio_dir,
                xml_dir: cli.xml_dir,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args).await
        }
    }
}

async fn run_generate(options: GenerateArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level.as_ref())?;

    // Override config with CLI options if provided
    if let Some(project_name) = options.project_name {
        config.project_name = project_name;
    }
    if let Some(fps) = options.fps {
        config.fps = fps;
    }
    if let Some(audio_dir) = options.audio_dir {
        config.audio_dir = audio_dir;
    }
    if let Some(xml_dir) = options.xml_dir {
        config.xml_dir = xml_dir;
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller
        .run_generate(&options.script_path, options.force_overwrite)
        .await?;
    Ok(())
}

async fn run_synthesize(options: SynthArgs) -> Result<()> {
    let mut config = load_config(&options.config_path, options.log_level.as_ref())?;

    if let Some(audio_dir) = options.audio_dir {
        config.audio_dir = audio_dir;
    }

    config.validate().context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    controller.run_synthesize(&options.script_path).await?;
    Ok(())
}

/// Load the configuration file, creating a default one when missing, and
/// apply the effective log level.
fn load_config(config_path: &str, cmd_log_level: Option<&CliLogLevel>) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = cmd_log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    if let Some(cmd_log_level) = cmd_log_level {
        config.log_level = cmd_log_level.clone().into();
    } else {
        // If log level was not set via command line, take it from the config
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}
