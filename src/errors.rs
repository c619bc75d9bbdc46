/*!
 * Error types for the yukigen application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing a scenario script
#[derive(Error, Debug)]
pub enum ScriptError {
    /// A line matched neither the section-marker nor the dialogue grammar.
    /// Carries the raw offending line, original whitespace included.
    #[error("Invalid line format: {0:?}")]
    InvalidLine(String),
}

/// Errors that can occur while synthesizing voice clips
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// No voice preset is configured for a speaker found in the script
    #[error("No voice preset configured for speaker {speaker:?}")]
    MissingPreset {
        /// The unmatched speaker label
        speaker: String,
    },

    /// The external synthesis command exited with a failure status
    #[error("Synthesis command failed for speaker {speaker:?}: {detail}")]
    CommandFailed {
        /// Speaker whose line was being synthesized
        speaker: String,
        /// Command line or exit status description
        detail: String,
    },

    /// The external synthesis command did not finish in time
    #[error("Synthesis command timed out after {timeout_secs}s for speaker {speaker:?}")]
    Timeout {
        /// Speaker whose line was being synthesized
        speaker: String,
        /// Configured timeout in seconds
        timeout_secs: u64,
    },

    /// An I/O error while preparing or collecting synthesis artifacts
    #[error("I/O error during synthesis: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from script parsing
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Error from audio synthesis
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
