//! Level Module
//!
//! The per-level VO sequencer, the host collaborators it talks to, and a
//! headless driver that runs a level without an engine.

pub mod host;
pub mod sequencer;
pub mod simulation;

pub use host::{GameLoop, HostEvent, LevelHost, LevelId, LevelListener, RecordingHost, UiHost};
pub use sequencer::{LevelSequencer, SequencerState, StopHandler};
pub use simulation::{run_level, LevelReport, SimulationOptions, TimelineEntry};
