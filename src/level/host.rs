//! Host collaborators of a level
//!
//! The engine side is reached only through these traits. Each collaborator
//! is handed to the level at construction; nothing is looked up globally.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::error::{BinoraError, Result};

/// Identifier of a level the game loop can open
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LevelId(String);

impl LevelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game mode / level controller
pub trait GameLoop {
    /// Start the memorization timer of the current level
    fn start_memorization_timer(&mut self) -> Result<()>;

    /// Load another level by identifier
    fn open_level(&mut self, level: &LevelId) -> Result<()>;
}

/// HUD that owns the level widgets
pub trait UiHost {
    /// Create and show the memorization timer widget
    fn create_timer_widget(&mut self) -> Result<()>;
}

/// Receiver of level lifecycle notifications
pub trait LevelListener {
    fn level_started(&mut self);

    fn level_ended(&mut self);
}

/// Collaborators available to one level
///
/// Every slot is optional. Requests against an empty slot fail with
/// [`BinoraError::CollaboratorUnavailable`].
#[derive(Default)]
pub struct LevelHost {
    game_loop: Option<Box<dyn GameLoop>>,
    ui: Option<Box<dyn UiHost>>,
    listeners: Vec<Box<dyn LevelListener>>,
}

impl LevelHost {
    /// Create a host with no collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose every collaborator records into `recorder`
    pub fn recording(recorder: &RecordingHost) -> Self {
        Self::new()
            .with_game_loop(recorder.clone())
            .with_ui(recorder.clone())
            .with_listener(recorder.clone())
    }

    pub fn with_game_loop(mut self, game_loop: impl GameLoop + 'static) -> Self {
        self.game_loop = Some(Box::new(game_loop));
        self
    }

    pub fn with_ui(mut self, ui: impl UiHost + 'static) -> Self {
        self.ui = Some(Box::new(ui));
        self
    }

    pub fn with_listener(mut self, listener: impl LevelListener + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn start_memorization_timer(&mut self) -> Result<()> {
        self.game_loop
            .as_mut()
            .ok_or(BinoraError::CollaboratorUnavailable { name: "game loop" })?
            .start_memorization_timer()
    }

    pub fn open_level(&mut self, level: &LevelId) -> Result<()> {
        self.game_loop
            .as_mut()
            .ok_or(BinoraError::CollaboratorUnavailable { name: "game loop" })?
            .open_level(level)
    }

    pub fn create_timer_widget(&mut self) -> Result<()> {
        self.ui
            .as_mut()
            .ok_or(BinoraError::CollaboratorUnavailable { name: "HUD" })?
            .create_timer_widget()
    }

    /// Notify every listener that the level started
    pub fn level_started(&mut self) {
        for listener in &mut self.listeners {
            listener.level_started();
        }
    }

    /// Notify every listener that the level ended
    pub fn level_ended(&mut self) {
        for listener in &mut self.listeners {
            listener.level_ended();
        }
    }
}

impl fmt::Debug for LevelHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelHost")
            .field("game_loop", &self.game_loop.is_some())
            .field("ui", &self.ui.is_some())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Request or notification observed by a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    MemorizationTimerStarted,
    TimerWidgetCreated,
    LevelOpened { level: LevelId },
    LevelStarted,
    LevelEnded,
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostEvent::MemorizationTimerStarted => write!(f, "memorization timer started"),
            HostEvent::TimerWidgetCreated => write!(f, "timer widget created"),
            HostEvent::LevelOpened { level } => write!(f, "opened level {level}"),
            HostEvent::LevelStarted => write!(f, "level started"),
            HostEvent::LevelEnded => write!(f, "level ended"),
        }
    }
}

/// Host that records every request in order
///
/// Clones share one log, so a test or driver can keep a clone while the
/// level owns the others.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    log: Rc<RefCell<Vec<HostEvent>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    pub fn events(&self) -> Vec<HostEvent> {
        self.log.borrow().clone()
    }

    /// Recorded events from index `start` onwards
    pub fn events_since(&self, start: usize) -> Vec<HostEvent> {
        self.log.borrow().iter().skip(start).cloned().collect()
    }

    /// Number of times `event` was recorded
    pub fn count(&self, event: &HostEvent) -> usize {
        self.log.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    fn record(&self, event: HostEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl GameLoop for RecordingHost {
    fn start_memorization_timer(&mut self) -> Result<()> {
        self.record(HostEvent::MemorizationTimerStarted);
        Ok(())
    }

    fn open_level(&mut self, level: &LevelId) -> Result<()> {
        self.record(HostEvent::LevelOpened {
            level: level.clone(),
        });
        Ok(())
    }
}

impl UiHost for RecordingHost {
    fn create_timer_widget(&mut self) -> Result<()> {
        self.record(HostEvent::TimerWidgetCreated);
        Ok(())
    }
}

impl LevelListener for RecordingHost {
    fn level_started(&mut self) {
        self.record(HostEvent::LevelStarted);
    }

    fn level_ended(&mut self) {
        self.record(HostEvent::LevelEnded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_host_reports_unavailable() {
        let mut host = LevelHost::new();
        let err = host.start_memorization_timer().unwrap_err();
        assert_eq!(err.error_code(), "COLLABORATOR_UNAVAILABLE");
        assert!(host.create_timer_widget().is_err());
        assert!(host.open_level(&LevelId::new("/Game/Maps/MainMenu")).is_err());

        // Notifications without listeners are fine.
        host.level_started();
        host.level_ended();
    }

    #[test]
    fn test_recording_host_shares_log() {
        let recorder = RecordingHost::new();
        let mut host = LevelHost::recording(&recorder);

        host.start_memorization_timer().unwrap();
        host.create_timer_widget().unwrap();
        host.level_started();

        assert_eq!(
            recorder.events(),
            vec![
                HostEvent::MemorizationTimerStarted,
                HostEvent::TimerWidgetCreated,
                HostEvent::LevelStarted,
            ]
        );
        assert_eq!(recorder.events_since(2), vec![HostEvent::LevelStarted]);
    }

    #[test]
    fn test_listeners_all_notified() {
        let first = RecordingHost::new();
        let second = RecordingHost::new();
        let mut host = LevelHost::new()
            .with_listener(first.clone())
            .with_listener(second.clone());

        host.level_ended();
        assert_eq!(first.count(&HostEvent::LevelEnded), 1);
        assert_eq!(second.count(&HostEvent::LevelEnded), 1);
    }

    #[test]
    fn test_host_event_serializes_tagged() {
        let event = HostEvent::LevelOpened {
            level: LevelId::new("/Game/Maps/MainMenu"),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"kind":"level_opened","level":"/Game/Maps/MainMenu"}"#);
    }

    #[test]
    fn test_debug_lists_slots() {
        let host = LevelHost::recording(&RecordingHost::new());
        let debug = format!("{host:?}");
        assert!(debug.contains("game_loop: true"));
        assert!(debug.contains("listeners: 1"));
    }
}
