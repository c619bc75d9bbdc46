/*!
 * # yukigen - Yukkuri timeline generator
 *
 * A Rust library for compiling plain-text dialogue scripts into
 * Premiere-importable timeline documents.
 *
 * ## Features
 *
 * - Parse the fullwidth-space dialogue script grammar into ordered entries
 * - Synthesize one voice clip per line through per-speaker command templates
 * - Measure clip durations from WAV metadata, with a deterministic text
 *   heuristic when audio is missing or unreadable
 * - Lay clips back-to-back with frame-accurate `HH:MM:SS:FF` timecodes
 * - Emit a two-track (caption + audio) xmeml interchange document
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `script_parser`: Script grammar and dialogue entries
 * - `duration`: Per-line duration measurement and estimation
 * - `timecode`: Frame/timecode math
 * - `timeline`: Clip assembly with positional audio pairing
 * - `premiere_xml`: Interchange XML serialization
 * - `synthesis`: External voice synthesis collaborators:
 *   - `synthesis::aquestalk`: Command-template driven producer
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod duration;
pub mod errors;
pub mod file_utils;
pub mod premiere_xml;
pub mod script_parser;
pub mod synthesis;
pub mod timecode;
pub mod timeline;

// Re-export main types for easier usage
pub use app_config::{Config, VoicePreset};
pub use errors::{AppError, ScriptError, SynthesisError};
pub use premiere_xml::PremiereXmlBuilder;
pub use script_parser::{DialogueLine, ScriptParser};
pub use timeline::{Timeline, TimelineClip};
