use anyhow::{Context, Result};
use std::path::Path;

use crate::errors::ScriptError;
use crate::file_utils::FileManager;

// @module: Scenario script parsing

/// Separator between speaker and dialogue text: a fullwidth space (U+3000)
pub const SPEAKER_SEPARATOR: char = '\u{3000}';

/// Prefix that marks a section label line
const SECTION_PREFIX: &str = "- ";

// @struct: One parsed line of dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    // @field: Speaker label, stored raw
    pub speaker: String,

    // @field: Dialogue text, stored raw
    pub text: String,

    // @field: Section label inherited from the most recent marker
    pub section: Option<String>,
}

impl DialogueLine {
    /// Creates a new dialogue line - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(speaker: impl Into<String>, text: impl Into<String>, section: Option<String>) -> Self {
        DialogueLine {
            speaker: speaker.into(),
            text: text.into(),
            section,
        }
    }

    /// Speaker label with surrounding whitespace removed
    pub fn normalized_speaker(&self) -> String {
        self.speaker.trim().to_string()
    }

    /// Dialogue text trimmed, with internal whitespace runs collapsed to one space
    pub fn normalized_text(&self) -> String {
        normalize_whitespace(&self.text)
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parser that converts the domain specific script into dialogue entries.
///
/// Grammar, line by line (blank lines ignored):
/// - `- <label>` sets the current section; an empty label keeps the previous one
/// - `<speaker>\u{3000}<text>` appends a dialogue line carrying the current section
/// - anything else is a format error and the whole parse fails
#[derive(Debug, Clone, Default)]
pub struct ScriptParser {
    // @field: Section label active before the first marker line
    default_section: Option<String>,
}

impl ScriptParser {
    // @creates: Parser with no initial section
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser whose lines before the first marker carry the given section
    /// - used by tests and external consumers
    #[allow(dead_code)]
    pub fn with_default_section(section: impl Into<String>) -> Self {
        ScriptParser {
            default_section: Some(section.into()),
        }
    }

    /// Parse a whole script into ordered dialogue lines.
    ///
    /// All-or-nothing: the first structurally invalid line aborts the parse
    /// and no partial result is returned.
    pub fn parse(&self, text: &str) -> Result<Vec<DialogueLine>, ScriptError> {
        let mut section = self.default_section.clone();
        let mut dialogues = Vec::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix(SECTION_PREFIX) {
                let label = rest.trim();
                if !label.is_empty() {
                    section = Some(label.to_string());
                }
                continue;
            }

            if let Some((speaker, content)) = line.split_once(SPEAKER_SEPARATOR) {
                let speaker = speaker.trim();
                let content = content.trim();
                // A dialogue line with an empty speaker or empty text must
                // never be constructed; reject the raw line instead.
                if speaker.is_empty() || content.is_empty() {
                    return Err(ScriptError::InvalidLine(raw_line.to_string()));
                }
                dialogues.push(DialogueLine {
                    speaker: speaker.to_string(),
                    text: content.to_string(),
                    section: section.clone(),
                });
                continue;
            }

            return Err(ScriptError::InvalidLine(raw_line.to_string()));
        }

        Ok(dialogues)
    }

    /// Read a UTF-8 script file and parse it
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<DialogueLine>> {
        let path = path.as_ref();
        let text = FileManager::read_to_string(path)?;
        self.parse(&text)
            .with_context(|| format!("Failed to parse script: {}", path.display()))
    }
}
