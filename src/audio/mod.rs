//! Audio Module
//!
//! VO event references, the asset registry that resolves them, and the
//! playback handle the level sequencer drives.

pub mod event;
pub mod playback;

pub use event::{AssetRegistry, AudioEventRef};
pub use playback::{AudioPlayback, PlaybackHandle, PlaybackStopped, StopReason};
