//! Playback handle for VO events
//!
//! `AudioPlayback` is the contract the level sequencer drives: set an
//! event, play it, and learn about stops through the host. `PlaybackHandle`
//! is the in-memory implementation used by the headless simulation and the
//! tests; a real engine backend implements the same trait.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::event::AudioEventRef;

/// Why a playback instance stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The event played to its end
    Completed,
    /// Playback was halted before the end
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Completed => write!(f, "Completed"),
            StopReason::Interrupted => write!(f, "Interrupted"),
        }
    }
}

/// Stop notification emitted by a playback handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackStopped {
    pub event: AudioEventRef,
    pub reason: StopReason,
}

/// Audio playback service seen from the level sequencer
pub trait AudioPlayback {
    /// Set the event to play next. `None` clears the handle.
    fn set_event(&mut self, event: Option<AudioEventRef>);

    /// Currently assigned event
    fn event(&self) -> Option<&AudioEventRef>;

    /// Start playing the assigned event. No-op without an event.
    fn play(&mut self);

    fn is_playing(&self) -> bool;

    /// Whether the handle starts playing on its own when activated by the host
    fn auto_activate(&self) -> bool;

    fn set_auto_activate(&mut self, enabled: bool);
}

/// Handle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleState {
    /// Nothing playing (default state)
    #[default]
    Idle,
    /// An event instance is playing
    Playing,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleState::Idle => write!(f, "Idle"),
            HandleState::Playing => write!(f, "Playing"),
        }
    }
}

/// In-memory playback handle with a simulated playhead
///
/// Stop notifications are returned from [`PlaybackHandle::advance`] and
/// [`PlaybackHandle::stop`]; the host forwards them to whoever listens.
#[derive(Debug, Clone, Default)]
pub struct PlaybackHandle {
    /// Current handle state
    state: HandleState,

    /// Assigned event
    event: Option<AudioEventRef>,

    /// Playhead position within the current instance
    position: Duration,

    /// Auto-activation flag; off unless a host turns it on
    auto_activate: bool,

    /// Number of instances started over the handle's lifetime
    play_count: u32,
}

impl PlaybackHandle {
    /// Create an idle handle with auto-activation disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the playhead by `elapsed`
    ///
    /// Returns a `Completed` notification when the event reaches its end.
    pub fn advance(&mut self, elapsed: Duration) -> Option<PlaybackStopped> {
        if self.state != HandleState::Playing {
            return None;
        }
        let event = self.event.as_ref()?;

        self.position = self.position.saturating_add(elapsed);
        if self.position < event.length() {
            return None;
        }

        let stopped = PlaybackStopped {
            event: event.clone(),
            reason: StopReason::Completed,
        };
        self.state = HandleState::Idle;
        self.position = Duration::ZERO;
        tracing::debug!(event = %stopped.event, "playback completed");
        Some(stopped)
    }

    /// Halt playback
    ///
    /// Returns an `Interrupted` notification if an instance was playing.
    pub fn stop(&mut self) -> Option<PlaybackStopped> {
        if self.state != HandleState::Playing {
            return None;
        }
        self.state = HandleState::Idle;
        self.position = Duration::ZERO;

        let event = self.event.clone()?;
        tracing::debug!(event = %event, "playback interrupted");
        Some(PlaybackStopped {
            event,
            reason: StopReason::Interrupted,
        })
    }

    /// Current handle state
    pub fn state(&self) -> HandleState {
        self.state
    }

    /// Playhead position within the current instance
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Number of instances started so far
    pub fn play_count(&self) -> u32 {
        self.play_count
    }
}

impl AudioPlayback for PlaybackHandle {
    fn set_event(&mut self, event: Option<AudioEventRef>) {
        if self.event == event {
            return;
        }
        if self.state == HandleState::Playing {
            // Swapping events releases the running instance without a stop notification.
            tracing::debug!(
                from = ?self.event.as_ref().map(AudioEventRef::path),
                "releasing playing instance"
            );
            self.state = HandleState::Idle;
        }
        self.position = Duration::ZERO;
        self.event = event;
    }

    fn event(&self) -> Option<&AudioEventRef> {
        self.event.as_ref()
    }

    fn play(&mut self) {
        match (&self.event, self.state) {
            (None, _) => {
                tracing::debug!("play requested with no event assigned");
            }
            (Some(event), HandleState::Playing) => {
                tracing::debug!(event = %event, "already playing");
            }
            (Some(event), HandleState::Idle) => {
                tracing::debug!(event = %event, "play");
                self.state = HandleState::Playing;
                self.position = Duration::ZERO;
                self.play_count += 1;
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.state == HandleState::Playing
    }

    fn auto_activate(&self) -> bool {
        self.auto_activate
    }

    fn set_auto_activate(&mut self, enabled: bool) {
        self.auto_activate = enabled;
    }
}
