/*!
 * Audio producer implementations for voice synthesis.
 *
 * This module defines the capability interface the timeline generation
 * consumes (one playable audio file per dialogue line, or a failure) and
 * the concrete implementation driving user supplied AquesTalk-style command
 * templates.
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::errors::SynthesisError;
use crate::script_parser::DialogueLine;

/// Common trait for all audio producers
///
/// Any implementation satisfies the same contract: given a dialogue line,
/// return a playable audio file at a known path, or fail. The timeline core
/// only ever reads metadata from whatever artifact it is handed; it never
/// invokes the producer itself.
#[async_trait]
pub trait AudioProducer: Send + Sync + Debug {
    /// Produce the voice clip for one dialogue line
    ///
    /// # Arguments
    /// * `sequence` - 1-based position of the line in the script
    /// * `dialogue` - The line to synthesize
    ///
    /// # Returns
    /// * `Result<PathBuf, SynthesisError>` - Path of the produced file or an error
    async fn produce(&self, sequence: usize, dialogue: &DialogueLine)
        -> Result<PathBuf, SynthesisError>;
}

pub mod aquestalk;

pub use aquestalk::AquesTalkProducer;
