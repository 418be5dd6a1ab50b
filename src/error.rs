//! Error handling for Binora
//!
//! Asset and collaborator failures are reported here but rarely fatal: the
//! level sequencer logs them and keeps advancing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Binora operations
pub type Result<T> = std::result::Result<T, BinoraError>;

/// Main error type for Binora operations
#[derive(Error, Debug)]
pub enum BinoraError {
    // Asset Errors
    #[error("Audio event not found: {path}")]
    AssetNotFound { path: String },

    #[error("Invalid audio asset {path}: {reason}")]
    InvalidAsset { path: PathBuf, reason: String },

    // Host Errors
    #[error("Host collaborator unavailable: {name}")]
    CollaboratorUnavailable { name: &'static str },

    #[error("Host request '{request}' failed: {reason}")]
    HostRequestFailed {
        request: &'static str,
        reason: String,
    },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Level Errors
    #[error("Level stalled in state {state} before reaching the main menu")]
    LevelStalled { state: String },
}

impl BinoraError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            BinoraError::AssetNotFound { .. } => "ASSET_NOT_FOUND",
            BinoraError::InvalidAsset { .. } => "INVALID_ASSET",
            BinoraError::CollaboratorUnavailable { .. } => "COLLABORATOR_UNAVAILABLE",
            BinoraError::HostRequestFailed { .. } => "HOST_REQUEST_FAILED",
            BinoraError::InvalidConfig { .. } => "INVALID_CONFIG",
            BinoraError::FileReadError { .. } => "FILE_READ_ERROR",
            BinoraError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            BinoraError::Serialization(_) => "SERIALIZATION_ERROR",
            BinoraError::LevelStalled { .. } => "LEVEL_STALLED",
        }
    }

    /// Check if the level can keep running after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BinoraError::AssetNotFound { .. }
                | BinoraError::InvalidAsset { .. }
                | BinoraError::CollaboratorUnavailable { .. }
                | BinoraError::HostRequestFailed { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            BinoraError::AssetNotFound { .. } => {
                Some("Check the event path in the level config against the asset manifest.")
            }
            BinoraError::InvalidAsset { .. } => Some("Re-export the VO file as PCM WAV."),
            BinoraError::CollaboratorUnavailable { .. } => {
                Some("Register the missing host collaborator before activating the level.")
            }
            BinoraError::LevelStalled { .. } => {
                Some("Run 'binora-cli check-assets' to find missing VO events.")
            }
            BinoraError::InvalidConfig { .. } => {
                Some("Run 'binora-cli init-config <path>' to write a fresh config.")
            }
            _ => None,
        }
    }
}
