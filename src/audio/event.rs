//! VO event references and the asset registry
//!
//! Event paths follow the engine's object path convention
//! (`/Game/<dir>/<Name>.<Name>`). Resolution never fails: an unknown path
//! simply yields `None` and the caller decides how loud to be about it.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::config::{DEFAULT_BEGIN_PLAY_EVENT, DEFAULT_GAME_OVER_EVENT};
use crate::error::{BinoraError, Result};

/// Root prefix of engine asset paths
const ASSET_ROOT: &str = "/Game";

/// Length of the stock BeginPlay VO
const DEFAULT_BEGIN_PLAY_LENGTH: Duration = Duration::from_millis(6_500);

/// Length of the stock GameOver VO
const DEFAULT_GAME_OVER_LENGTH: Duration = Duration::from_millis(4_000);

/// Opaque handle to a resolved VO event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioEventRef {
    path: String,
    length: Duration,
}

impl AudioEventRef {
    pub fn new(path: impl Into<String>, length: Duration) -> Self {
        Self {
            path: path.into(),
            length,
        }
    }

    /// Asset path this event was resolved from
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Playback length of one instance of the event
    pub fn length(&self) -> Duration {
        self.length
    }
}

impl fmt::Display for AudioEventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// One entry of an asset manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Engine asset path of the event.
    pub path: String,
    /// Event length in milliseconds.
    pub length_ms: u64,
}

/// JSON manifest listing the VO events available to a level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    pub events: Vec<ManifestEntry>,
}

/// Registry of VO events, keyed by asset path
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    events: HashMap<String, AudioEventRef>,
}

impl AssetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Create a registry holding the stock BeginPlay and GameOver events
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(AudioEventRef::new(
            DEFAULT_BEGIN_PLAY_EVENT,
            DEFAULT_BEGIN_PLAY_LENGTH,
        ));
        registry.register(AudioEventRef::new(
            DEFAULT_GAME_OVER_EVENT,
            DEFAULT_GAME_OVER_LENGTH,
        ));
        registry
    }

    /// Load a registry from a manifest file or a directory of WAV files
    pub fn load(source: &Path) -> Result<Self> {
        if source.is_dir() {
            Self::scan_dir(source)
        } else {
            Self::from_manifest(source)
        }
    }

    /// Load a registry from a JSON manifest.
    pub fn from_manifest(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BinoraError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let manifest: AssetManifest = serde_json::from_str(&content)?;

        let mut registry = Self::new();
        for entry in manifest.events {
            registry.register(AudioEventRef::new(
                entry.path,
                Duration::from_millis(entry.length_ms),
            ));
        }
        tracing::debug!(
            manifest = %path.display(),
            events = registry.len(),
            "loaded asset manifest"
        );
        Ok(registry)
    }

    /// Build a registry from every `.wav` file below `root`.
    ///
    /// `root/VO/Intro.wav` is registered as `/Game/VO/Intro.Intro`. Files
    /// that cannot be parsed are skipped with a warning.
    pub fn scan_dir(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(BinoraError::FileReadError {
                path: root.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            });
        }

        let mut registry = Self::new();
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            let is_wav = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
            if !entry.file_type().is_file() || !is_wav {
                continue;
            }

            let Some(asset_path) = asset_path_for(root, path) else {
                continue;
            };
            match wav_length(path) {
                Ok(length) => registry.register(AudioEventRef::new(asset_path, length)),
                Err(e) => tracing::warn!(file = %path.display(), error = %e, "skipping VO file"),
            }
        }
        Ok(registry)
    }

    /// Register an event, replacing any previous event with the same path
    pub fn register(&mut self, event: AudioEventRef) {
        self.events.insert(event.path().to_string(), event);
    }

    /// Resolve an asset path to an event
    pub fn resolve(&self, path: &str) -> Option<AudioEventRef> {
        self.events.get(path).cloned()
    }

    /// Check if an event is registered
    pub fn contains(&self, path: &str) -> bool {
        self.events.contains_key(path)
    }

    /// List all registered asset paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.events.keys().map(|s| s.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Map a file below `root` to its engine object path.
fn asset_path_for(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let mut asset_path = String::from(ASSET_ROOT);
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            asset_path.push('/');
            asset_path.push_str(component.as_os_str().to_str()?);
        }
    }
    asset_path.push('/');
    asset_path.push_str(stem);
    asset_path.push('.');
    asset_path.push_str(stem);
    Some(asset_path)
}

/// Read the playback length of a WAV file from its header.
fn wav_length(path: &Path) -> Result<Duration> {
    let reader = hound::WavReader::open(path).map_err(|e| BinoraError::InvalidAsset {
        path: PathBuf::from(path),
        reason: e.to_string(),
    })?;
    let sample_rate = reader.spec().sample_rate;
    if sample_rate == 0 {
        return Err(BinoraError::InvalidAsset {
            path: PathBuf::from(path),
            reason: "sample rate is zero".to_string(),
        });
    }
    let frames = u64::from(reader.duration());
    Ok(Duration::from_millis(frames * 1000 / u64::from(sample_rate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_silence(path: &Path, sample_rate: u32, frames: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_defaults_resolve_stock_events() {
        let registry = AssetRegistry::with_defaults();
        assert_eq!(registry.len(), 2);

        let begin = registry.resolve(DEFAULT_BEGIN_PLAY_EVENT).unwrap();
        assert_eq!(begin.path(), DEFAULT_BEGIN_PLAY_EVENT);
        assert!(registry.contains(DEFAULT_GAME_OVER_EVENT));
    }

    #[test]
    fn test_unknown_path_resolves_to_none() {
        let registry = AssetRegistry::with_defaults();
        assert!(registry.resolve("/Game/VO/Nope.Nope").is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = AssetRegistry::new();
        registry.register(AudioEventRef::new("/Game/VO/A.A", Duration::from_secs(1)));
        registry.register(AudioEventRef::new("/Game/VO/A.A", Duration::from_secs(2)));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve("/Game/VO/A.A").unwrap().length(),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_from_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(
            &path,
            r#"{"events":[{"path":"/Game/VO/Intro.Intro","length_ms":2500}]}"#,
        )
        .unwrap();

        let registry = AssetRegistry::load(&path).unwrap();
        let intro = registry.resolve("/Game/VO/Intro.Intro").unwrap();
        assert_eq!(intro.length(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_manifest_missing_file() {
        let dir = tempdir().unwrap();
        let err = AssetRegistry::from_manifest(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_READ_ERROR");
    }

    #[test]
    fn test_scan_dir_maps_object_paths() {
        let dir = tempdir().unwrap();
        let vo_dir = dir.path().join("VO").join("AnyLevel");
        fs::create_dir_all(&vo_dir).unwrap();
        write_silence(&vo_dir.join("Intro.wav"), 8000, 12000);
        fs::write(dir.path().join("notes.txt"), "not audio").unwrap();

        let registry = AssetRegistry::load(dir.path()).unwrap();
        assert_eq!(registry.paths(), vec!["/Game/VO/AnyLevel/Intro.Intro"]);
        assert_eq!(
            registry
                .resolve("/Game/VO/AnyLevel/Intro.Intro")
                .unwrap()
                .length(),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn test_scan_dir_skips_broken_wav() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Broken.wav"), b"RIFF....").unwrap();
        write_silence(&dir.path().join("Good.wav"), 8000, 8000);

        let registry = AssetRegistry::scan_dir(dir.path()).unwrap();
        assert_eq!(registry.paths(), vec!["/Game/Good.Good"]);
    }
}
