/*!
 * Tests for application configuration
 */

use std::path::PathBuf;

use yukigen::app_config::{Config, LogLevel, VoicePreset};

fn preset(speaker: &str, template: &str) -> VoicePreset {
    VoicePreset {
        speaker: speaker.to_string(),
        command_template: template.to_string(),
        voice_id: None,
        speed: None,
        volume: None,
        use_text_file: false,
        text_file_encoding: "utf-8".to_string(),
        text_file_suffix: ".txt".to_string(),
    }
}

/// Test the default configuration values
#[test]
fn test_config_default_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.project_name, "YukkuriProject");
    assert_eq!(config.fps, 30);
    assert_eq!(config.audio_sample_rate, 44100);
    assert_eq!(config.audio_dir, PathBuf::from("output/audio"));
    assert_eq!(config.xml_dir, PathBuf::from("output/premiere"));
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.synthesis.presets.is_empty());
    assert!(config.validate().is_ok());
}

/// Test that an empty JSON object deserializes to the defaults
#[test]
fn test_config_withEmptyJson_shouldApplyDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();

    assert_eq!(config.project_name, "YukkuriProject");
    assert_eq!(config.fps, 30);
    assert_eq!(config.synthesis.timeout_secs, 60);
}

/// Test a config serialization round trip
#[test]
fn test_config_withSerdeRoundTrip_shouldPreserveFields() {
    let mut config = Config::default();
    config.project_name = "MyShow".to_string();
    config.fps = 24;
    config.synthesis.presets.push(preset("霊夢", "aquestalk {text} {output}"));

    let json = serde_json::to_string_pretty(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.project_name, "MyShow");
    assert_eq!(restored.fps, 24);
    assert_eq!(restored.synthesis.presets.len(), 1);
    assert_eq!(restored.synthesis.presets[0].speaker, "霊夢");
}

/// Test preset field defaults when parsing minimal JSON
#[test]
fn test_voice_preset_withMinimalJson_shouldApplyDefaults() {
    let json = r#"{"speaker": "霊夢", "command_template": "aquestalk -o {output} {text}"}"#;
    let preset: VoicePreset = serde_json::from_str(json).unwrap();

    assert_eq!(preset.speaker, "霊夢");
    assert_eq!(preset.voice_id, None);
    assert!(!preset.use_text_file);
    assert_eq!(preset.text_file_encoding, "utf-8");
    assert_eq!(preset.text_file_suffix, ".txt");
}

/// Test log level lowercase serialization
#[test]
fn test_log_level_withSerde_shouldUseLowercase() {
    assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    let level: LogLevel = serde_json::from_str("\"warn\"").unwrap();
    assert_eq!(level, LogLevel::Warn);
}

/// Test validation of an empty project name
#[test]
fn test_validate_withEmptyProjectName_shouldFail() {
    let mut config = Config::default();
    config.project_name = "   ".to_string();
    assert!(config.validate().is_err());
}

/// Test validation of a zero frame rate
#[test]
fn test_validate_withZeroFps_shouldFail() {
    let mut config = Config::default();
    config.fps = 0;
    assert!(config.validate().is_err());
}

/// Test validation of a preset with an empty speaker label
#[test]
fn test_validate_withEmptyPresetSpeaker_shouldFail() {
    let mut config = Config::default();
    config.synthesis.presets.push(preset("", "aquestalk {text}"));
    assert!(config.validate().is_err());
}

/// Test validation of an unknown text file encoding
#[test]
fn test_validate_withUnknownEncoding_shouldFail() {
    let mut config = Config::default();
    let mut bad = preset("霊夢", "aquestalk {text}");
    bad.text_file_encoding = "not-an-encoding".to_string();
    config.synthesis.presets.push(bad);
    assert!(config.validate().is_err());
}

/// Test that shift_jis is an accepted encoding label
#[test]
fn test_validate_withShiftJisEncoding_shouldPass() {
    let mut config = Config::default();
    let mut sjis = preset("霊夢", "aquestalk {text_file}");
    sjis.use_text_file = true;
    sjis.text_file_encoding = "shift_jis".to_string();
    config.synthesis.presets.push(sjis);
    assert!(config.validate().is_ok());
}
