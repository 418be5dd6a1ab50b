//! Level audio sequencer
//!
//! Plays the intro VO when a level activates, arms the game-over VO once the
//! intro stops, and returns to the main menu after the game-over VO stops.
//!
//! ```text
//! Init --activate--> AwaitingBeginPlayDone --stop--> AwaitingGameOverDone --stop--> Terminal
//! ```
//!
//! The current state decides which stop handler is bound; there is never
//! more than one.

use std::fmt;

use serde::Serialize;

use crate::audio::{AssetRegistry, AudioEventRef, AudioPlayback, PlaybackHandle, PlaybackStopped};
use crate::config::LevelConfig;
use crate::error::Result;

use super::host::{LevelHost, LevelId};

/// Sequencer states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SequencerState {
    /// Constructed, waiting for the host to activate the level (default state)
    #[default]
    Init,
    /// Intro VO playing
    AwaitingBeginPlayDone,
    /// Game-over VO armed or playing
    AwaitingGameOverDone,
    /// Main menu requested; nothing left to do
    Terminal,
}

impl SequencerState {
    /// Stop handler bound while in this state
    pub fn stop_handler(self) -> Option<StopHandler> {
        match self {
            SequencerState::AwaitingBeginPlayDone => Some(StopHandler::BeginPlayStopped),
            SequencerState::AwaitingGameOverDone => Some(StopHandler::GameOverStopped),
            SequencerState::Init | SequencerState::Terminal => None,
        }
    }
}

impl fmt::Display for SequencerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequencerState::Init => write!(f, "Init"),
            SequencerState::AwaitingBeginPlayDone => write!(f, "AwaitingBeginPlayDone"),
            SequencerState::AwaitingGameOverDone => write!(f, "AwaitingGameOverDone"),
            SequencerState::Terminal => write!(f, "Terminal"),
        }
    }
}

/// Reaction to a playback stop notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopHandler {
    /// Intro finished: arm game over, start the memorization phase
    BeginPlayStopped,
    /// Game over finished: return to the main menu
    GameOverStopped,
}

/// Voice-over state machine of one level
///
/// Owns the level's playback handle exclusively. Host collaborators are
/// injected through [`LevelHost`]; a missing or failing collaborator is
/// logged and skipped so the sequence keeps moving.
#[derive(Debug)]
pub struct LevelSequencer<P = PlaybackHandle> {
    state: SequencerState,
    playback: P,
    begin_play_event: Option<AudioEventRef>,
    game_over_event: Option<AudioEventRef>,
    main_menu: LevelId,
    host: LevelHost,
}

impl<P: AudioPlayback> LevelSequencer<P> {
    /// Create a sequencer for a freshly constructed level
    ///
    /// Both VO events are resolved here, once. Unresolvable events leave
    /// their slot empty; playing them later is silent.
    pub fn new(
        config: &LevelConfig,
        registry: &AssetRegistry,
        mut playback: P,
        host: LevelHost,
    ) -> Self {
        let begin_play_event = resolve_event(registry, "begin play", &config.begin_play_event);
        let game_over_event = resolve_event(registry, "game over", &config.game_over_event);

        if playback.auto_activate() {
            tracing::debug!("disabling auto-activation on level playback handle");
            playback.set_auto_activate(false);
        }

        Self {
            state: SequencerState::Init,
            playback,
            begin_play_event,
            game_over_event,
            main_menu: LevelId::new(config.main_menu_level.clone()),
            host,
        }
    }

    /// Begin-play hook: start the intro VO
    ///
    /// Only acts once, from `Init`.
    pub fn activate(&mut self) {
        if self.state != SequencerState::Init {
            tracing::warn!(state = %self.state, "activate ignored: level already active");
            return;
        }

        self.playback.set_event(self.begin_play_event.clone());
        self.state = SequencerState::AwaitingBeginPlayDone;
        self.playback.play();

        tracing::info!(
            event = ?self.begin_play_event.as_ref().map(AudioEventRef::path),
            "level activated"
        );
    }

    /// Dispatch a stop notification from the playback handle
    ///
    /// Natural completion and interruption are handled alike. Returns the
    /// handler that ran, if any was bound.
    pub fn on_playback_stopped(&mut self, stopped: &PlaybackStopped) -> Option<StopHandler> {
        let handler = self.bound_handler();
        tracing::debug!(
            event = %stopped.event,
            reason = %stopped.reason,
            state = %self.state,
            "playback stopped"
        );

        match handler {
            Some(StopHandler::BeginPlayStopped) => self.on_begin_play_stopped(),
            Some(StopHandler::GameOverStopped) => self.on_game_over_stopped(),
            None => tracing::debug!(state = %self.state, "no stop handler bound"),
        }
        handler
    }

    /// Play the game-over VO
    ///
    /// Safe to call repeatedly and in any state; the stop transition may
    /// already have armed the same event.
    pub fn game_over(&mut self) {
        if self.game_over_event.is_none() {
            tracing::warn!("game over requested but the game-over VO is unavailable");
        }
        self.playback.set_event(self.game_over_event.clone());
        self.playback.play();
    }

    fn on_begin_play_stopped(&mut self) {
        // Rebind before any host call so a stop delivered during one of them
        // lands on the game-over handler.
        self.playback.set_event(self.game_over_event.clone());
        self.state = SequencerState::AwaitingGameOverDone;

        report("start memorization timer", self.host.start_memorization_timer());
        report("create timer widget", self.host.create_timer_widget());
        self.host.level_started();

        tracing::info!("intro finished, memorization phase started");
    }

    fn on_game_over_stopped(&mut self) {
        self.state = SequencerState::Terminal;

        let main_menu = self.main_menu.clone();
        report("open main menu", self.host.open_level(&main_menu));
        self.host.level_ended();

        tracing::info!(level = %main_menu, "level ended");
    }

    /// Current state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Stop handler currently bound to the playback handle
    pub fn bound_handler(&self) -> Option<StopHandler> {
        self.state.stop_handler()
    }

    /// Check if the main menu has been requested
    pub fn is_terminal(&self) -> bool {
        self.state == SequencerState::Terminal
    }

    /// Playback handle owned by this level
    pub fn playback(&self) -> &P {
        &self.playback
    }

    /// Mutable access to the playback handle, for the host to drive it
    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Intro VO, if it resolved at construction
    pub fn begin_play_event(&self) -> Option<&AudioEventRef> {
        self.begin_play_event.as_ref()
    }

    /// Game-over VO, if it resolved at construction
    pub fn game_over_event(&self) -> Option<&AudioEventRef> {
        self.game_over_event.as_ref()
    }

    /// Level opened once the game-over VO stops
    pub fn main_menu(&self) -> &LevelId {
        &self.main_menu
    }
}

fn resolve_event(registry: &AssetRegistry, role: &str, path: &str) -> Option<AudioEventRef> {
    let event = registry.resolve(path);
    if event.is_none() {
        tracing::warn!(role, path, "VO event not found, playback will be silent");
    }
    event
}

fn report(request: &'static str, result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!(request, code = e.error_code(), error = %e, "host request skipped");
    }
}
