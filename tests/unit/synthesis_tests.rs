/*!
 * Tests for voice synthesis command expansion and preset lookup
 */

use std::path::Path;

use anyhow::Result;
use yukigen::app_config::{SynthesisConfig, VoicePreset};
use yukigen::errors::SynthesisError;
use yukigen::script_parser::DialogueLine;
use yukigen::synthesis::aquestalk::expand_command;
use yukigen::synthesis::{AquesTalkProducer, AudioProducer};

fn preset(speaker: &str, template: &str) -> VoicePreset {
    VoicePreset {
        speaker: speaker.to_string(),
        command_template: template.to_string(),
        voice_id: Some("f1".to_string()),
        speed: Some(100),
        volume: Some(80),
        use_text_file: false,
        text_file_encoding: "utf-8".to_string(),
        text_file_suffix: ".txt".to_string(),
    }
}

/// Test placeholder substitution across tokens
#[test]
fn test_expand_command_withPlaceholders_shouldSubstitute() -> Result<()> {
    let preset = preset("霊夢", "aquestalk -v {voice_id} -s {speed} -o {output} {text}");
    let (args, text_file) = expand_command(&preset, "こんにちは", Path::new("out/0001.wav"))?;

    assert_eq!(
        args,
        vec!["aquestalk", "-v", "f1", "-s", "100", "-o", "out/0001.wav", "こんにちは"]
    );
    assert!(text_file.is_none());
    Ok(())
}

/// Test that text with spaces stays a single argument
#[test]
fn test_expand_command_withSpacesInText_shouldKeepSingleArgument() -> Result<()> {
    let preset = preset("霊夢", "say -o {output} \"line: {text}\"");
    let (args, _) = expand_command(&preset, "hello there", Path::new("out.wav"))?;

    assert_eq!(args, vec!["say", "-o", "out.wav", "line: hello there"]);
    Ok(())
}

/// Test that unset optional fields substitute as empty strings
#[test]
fn test_expand_command_withUnsetOptionals_shouldSubstituteEmpty() -> Result<()> {
    let mut preset = preset("霊夢", "tool {voice_id}{speed}{volume} {text}");
    preset.voice_id = None;
    preset.speed = None;
    preset.volume = None;

    let (args, _) = expand_command(&preset, "こんにちは", Path::new("out.wav"))?;
    assert_eq!(args, vec!["tool", "", "こんにちは"]);
    Ok(())
}

/// Test that the text file route writes the dialogue text
#[test]
fn test_expand_command_withTextFile_shouldWriteUtf8() -> Result<()> {
    let mut preset = preset("霊夢", "aquestalk -f {text_file} -o {output}");
    preset.use_text_file = true;

    let (args, text_file) = expand_command(&preset, "こんにちは", Path::new("out.wav"))?;
    let text_file = text_file.expect("text file should be created");

    assert_eq!(args[2], text_file.path().to_string_lossy());
    assert!(text_file.path().to_string_lossy().ends_with(".txt"));
    let written = std::fs::read(text_file.path())?;
    assert_eq!(written, "こんにちは".as_bytes());
    Ok(())
}

/// Test that the configured encoding is applied to the text file
#[test]
fn test_expand_command_withShiftJis_shouldEncodeText() -> Result<()> {
    let mut preset = preset("霊夢", "aquestalk -f {text_file} -o {output}");
    preset.use_text_file = true;
    preset.text_file_encoding = "shift_jis".to_string();

    let (_, text_file) = expand_command(&preset, "こんにちは", Path::new("out.wav"))?;
    let text_file = text_file.expect("text file should be created");

    let written = std::fs::read(text_file.path())?;
    assert_eq!(
        written,
        vec![0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD]
    );
    Ok(())
}

/// Test that an unbalanced quote in the template is rejected
#[test]
fn test_expand_command_withBrokenTemplate_shouldFail() {
    let preset = preset("霊夢", "aquestalk \"unterminated {text}");
    let result = expand_command(&preset, "こんにちは", Path::new("out.wav"));
    assert!(matches!(result, Err(SynthesisError::CommandFailed { .. })));
}

/// Test that a speaker without a preset is reported by name
#[test]
fn test_produce_withMissingPreset_shouldReportSpeaker() {
    let producer = AquesTalkProducer::from_config("out", &SynthesisConfig::default());
    let dialogue = DialogueLine::new("アリス", "こんにちは", None);

    let result = tokio_test::block_on(producer.produce(1, &dialogue));
    match result {
        Err(SynthesisError::MissingPreset { speaker }) => assert_eq!(speaker, "アリス"),
        other => panic!("Expected MissingPreset error, got {:?}", other),
    }
}

/// Test that the preset lookup uses the normalized speaker label
#[test]
fn test_produce_withPaddedSpeaker_shouldMatchPreset() -> Result<()> {
    let temp_dir = crate::common::create_temp_dir()?;
    let config = SynthesisConfig {
        timeout_secs: 10,
        presets: vec![preset("霊夢", "true")],
    };
    let producer = AquesTalkProducer::from_config(temp_dir.path(), &config);
    let dialogue = DialogueLine::new(" 霊夢 ", "こんにちは", None);

    let path = tokio_test::block_on(producer.produce(3, &dialogue))?;
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "0003_霊夢.wav"
    );
    Ok(())
}
