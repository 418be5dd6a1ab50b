//! Level configuration
//!
//! Which VO events a level plays, where it returns to, and how long the
//! memorization phase lasts. Stored as JSON; missing fields take defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BinoraError, Result};

/// VO played when a level begins
pub const DEFAULT_BEGIN_PLAY_EVENT: &str =
    "/Game/FMOD/Events/VO/AnyLevel/BeginPlay/VO_AnyLevel_BeginPlay.VO_AnyLevel_BeginPlay";

/// VO played when the game is over
pub const DEFAULT_GAME_OVER_EVENT: &str =
    "/Game/FMOD/Events/VO/AnyLevel/GameOver/VO_GameOver.VO_GameOver";

/// Level opened once the game-over VO finishes
pub const DEFAULT_MAIN_MENU_LEVEL: &str = "/Game/Maps/MainMenu";

/// Default memorization phase length in seconds
const DEFAULT_MEMORIZATION_SECS: u64 = 30;

/// Configuration for one level's audio sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Asset path of the intro VO.
    pub begin_play_event: String,
    /// Asset path of the game-over VO.
    pub game_over_event: String,
    /// Level identifier of the main menu.
    pub main_menu_level: String,
    /// Memorization phase length in seconds.
    pub memorization_secs: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            begin_play_event: DEFAULT_BEGIN_PLAY_EVENT.to_string(),
            game_over_event: DEFAULT_GAME_OVER_EVENT.to_string(),
            main_menu_level: DEFAULT_MAIN_MENU_LEVEL.to_string(),
            memorization_secs: DEFAULT_MEMORIZATION_SECS,
        }
    }
}

impl LevelConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BinoraError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: LevelConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| BinoraError::FileWriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(())
    }

    /// Reject configs the sequencer cannot act on.
    ///
    /// Event paths may be empty or unknown (playback degrades to silence);
    /// the main menu level may not.
    pub fn validate(&self) -> Result<()> {
        if self.main_menu_level.trim().is_empty() {
            return Err(BinoraError::InvalidConfig {
                reason: "main_menu_level must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
