//! Binora - Level Voice-Over Sequencing
//!
//! Each Binora level opens with a voice-over, hands over to a memorization
//! phase when the voice-over ends, and returns to the main menu after the
//! game-over voice-over.
//!
//! # Architecture
//!
//! - `audio`: VO event references, asset registry, playback handle
//! - `level`: the sequencer state machine and its host collaborators
//! - `config`: per-level JSON configuration
//! - `cli`: the `binora-cli` front end

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod level;

pub use audio::{AssetRegistry, AudioEventRef, AudioPlayback, PlaybackHandle};
pub use config::LevelConfig;
pub use error::{BinoraError, Result};
pub use level::{LevelHost, LevelSequencer, SequencerState};
