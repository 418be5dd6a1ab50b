//! Headless level run
//!
//! Drives a [`LevelSequencer`] over a [`PlaybackHandle`] with a fixed tick,
//! standing in for the engine: forwards stop notifications, and plays the
//! game-over VO once the memorization timer runs out.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::audio::{AssetRegistry, PlaybackHandle};
use crate::config::LevelConfig;
use crate::error::{BinoraError, Result};

use super::host::{HostEvent, LevelHost, RecordingHost};
use super::sequencer::{LevelSequencer, SequencerState};

/// Default simulation step
const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Give up on a level that has not ended after this long
const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(600);

/// Simulation settings
#[derive(Debug, Clone)]
pub struct SimulationOptions {
    /// Simulated time per step
    pub tick: Duration,
    /// Simulated time after which the run is reported as stalled
    pub max_duration: Duration,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            max_duration: DEFAULT_MAX_DURATION,
        }
    }
}

/// A host event and when it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Simulated milliseconds since activation.
    pub elapsed_ms: u64,
    /// What the level asked of the host.
    pub event: HostEvent,
}

/// Outcome of one simulated level.
#[derive(Debug, Clone, Serialize)]
pub struct LevelReport {
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    /// State the sequencer ended in.
    pub final_state: SequencerState,
    /// True if the level never reached its terminal state.
    pub stalled: bool,
    /// Simulated milliseconds covered by the run.
    pub elapsed_ms: u64,
    /// When the game-over VO was requested, if it was.
    pub game_over_at_ms: Option<u64>,
    /// Number of VO instances started.
    pub playback_starts: u32,
    /// Host requests in order.
    pub timeline: Vec<TimelineEntry>,
}

impl LevelReport {
    /// Events of the timeline without timestamps
    pub fn events(&self) -> Vec<&HostEvent> {
        self.timeline.iter().map(|entry| &entry.event).collect()
    }
}

/// Run one level from activation to the main menu
pub fn run_level(
    config: &LevelConfig,
    registry: &AssetRegistry,
    options: &SimulationOptions,
) -> Result<LevelReport> {
    config.validate()?;
    if options.tick.is_zero() {
        return Err(BinoraError::InvalidConfig {
            reason: "simulation tick must be positive".to_string(),
        });
    }

    let recorder = RecordingHost::new();
    let mut sequencer = LevelSequencer::new(
        config,
        registry,
        PlaybackHandle::new(),
        LevelHost::recording(&recorder),
    );
    let memorization = Duration::from_secs(config.memorization_secs);

    let started_at = Utc::now();
    let mut elapsed = Duration::ZERO;
    let mut timer_started_at: Option<Duration> = None;
    let mut game_over_at: Option<Duration> = None;
    let mut timeline = Vec::new();

    sequencer.activate();

    while !sequencer.is_terminal() && elapsed < options.max_duration {
        elapsed = elapsed.saturating_add(options.tick);

        if let Some(stopped) = sequencer.playback_mut().advance(options.tick) {
            sequencer.on_playback_stopped(&stopped);
        }

        for event in recorder.events_since(timeline.len()) {
            if event == HostEvent::MemorizationTimerStarted {
                timer_started_at = Some(elapsed);
            }
            timeline.push(TimelineEntry {
                elapsed_ms: as_millis(elapsed),
                event,
            });
        }

        if let (Some(started), None) = (timer_started_at, game_over_at) {
            if elapsed - started >= memorization {
                tracing::debug!(elapsed_ms = as_millis(elapsed), "memorization timer expired");
                sequencer.game_over();
                game_over_at = Some(elapsed);
            }
        }
    }

    let stalled = !sequencer.is_terminal();
    if stalled {
        tracing::warn!(
            state = %sequencer.state(),
            elapsed_ms = as_millis(elapsed),
            "level did not finish"
        );
    }

    Ok(LevelReport {
        started_at,
        final_state: sequencer.state(),
        stalled,
        elapsed_ms: as_millis(elapsed),
        game_over_at_ms: game_over_at.map(as_millis),
        playback_starts: sequencer.playback().play_count(),
        timeline,
    })
}

fn as_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
