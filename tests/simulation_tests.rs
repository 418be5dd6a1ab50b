//! Simulation Tests
//!
//! Headless level runs end to end, including assets loaded from disk.

use std::fs;
use std::path::Path;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use test_case::test_case;

use binora::audio::{AssetRegistry, AudioEventRef};
use binora::config::{LevelConfig, DEFAULT_MAIN_MENU_LEVEL};
use binora::level::{run_level, HostEvent, LevelId, SequencerState, SimulationOptions};

fn registry(intro_ms: u64, outro_ms: u64) -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    registry.register(AudioEventRef::new(
        "/Game/VO/Intro.Intro",
        Duration::from_millis(intro_ms),
    ));
    registry.register(AudioEventRef::new(
        "/Game/VO/Outro.Outro",
        Duration::from_millis(outro_ms),
    ));
    registry
}

fn config(memorization_secs: u64) -> LevelConfig {
    LevelConfig {
        begin_play_event: "/Game/VO/Intro.Intro".to_string(),
        game_over_event: "/Game/VO/Outro.Outro".to_string(),
        memorization_secs,
        ..LevelConfig::default()
    }
}

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
fn test_event_order() {
    let report =
        run_level(&config(1), &registry(1_000, 500), &SimulationOptions::default()).unwrap();

    assert!(!report.stalled);
    assert_eq!(report.final_state, SequencerState::Terminal);
    assert_eq!(
        report.events(),
        vec![
            &HostEvent::MemorizationTimerStarted,
            &HostEvent::TimerWidgetCreated,
            &HostEvent::LevelStarted,
            &HostEvent::LevelOpened {
                level: LevelId::new(DEFAULT_MAIN_MENU_LEVEL),
            },
            &HostEvent::LevelEnded,
        ]
    );
}

#[test_case(1_000, 500, 1, 2_000, 2_500 ; "short level")]
#[test_case(3_000, 2_000, 0, 3_000, 5_000 ; "no memorization phase")]
#[test_case(250, 250, 10, 10_300, 10_600 ; "lengths off the tick grid")]
fn test_timing(intro_ms: u64, outro_ms: u64, memorization: u64, game_over_ms: u64, end_ms: u64) {
    let report = run_level(
        &config(memorization),
        &registry(intro_ms, outro_ms),
        &SimulationOptions::default(),
    )
    .unwrap();

    assert_eq!(report.game_over_at_ms, Some(game_over_ms));
    assert_eq!(report.elapsed_ms, end_ms);
    assert_eq!(report.timeline.last().map(|e| e.elapsed_ms), Some(end_ms));
}

#[test]
fn test_missing_intro_stalls() {
    let level = LevelConfig {
        begin_play_event: "/Game/VO/Missing.Missing".to_string(),
        ..config(1)
    };
    let options = SimulationOptions {
        max_duration: Duration::from_secs(5),
        ..SimulationOptions::default()
    };
    let report = run_level(&level, &registry(1_000, 500), &options).unwrap();

    assert!(report.stalled);
    assert_eq!(report.final_state, SequencerState::AwaitingBeginPlayDone);
    assert_eq!(report.playback_starts, 0);
    assert!(report.timeline.is_empty());
}

#[test]
fn test_missing_outro_stalls_after_memorization() {
    let level = LevelConfig {
        game_over_event: "/Game/VO/Missing.Missing".to_string(),
        ..config(1)
    };
    let options = SimulationOptions {
        max_duration: Duration::from_secs(5),
        ..SimulationOptions::default()
    };
    let report = run_level(&level, &registry(1_000, 500), &options).unwrap();

    assert!(report.stalled);
    assert_eq!(report.final_state, SequencerState::AwaitingGameOverDone);
    assert_eq!(report.game_over_at_ms, Some(2_000));
    assert_eq!(report.events().last(), Some(&&HostEvent::LevelStarted));
}

#[test]
fn test_report_serializes() {
    let report =
        run_level(&config(1), &registry(1_000, 500), &SimulationOptions::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["final_state"], "Terminal");
    assert_eq!(json["stalled"], false);
    assert_eq!(json["timeline"][0]["event"]["kind"], "memorization_timer_started");
    assert_eq!(json["timeline"][3]["event"]["level"], DEFAULT_MAIN_MENU_LEVEL);
}

#[test]
fn test_level_from_files_on_disk() {
    let dir = tempdir().unwrap();
    let assets = dir.path().join("Content");
    let vo = assets.join("VO");
    fs::create_dir_all(&vo).unwrap();
    write_silence(&vo.join("Intro.wav"), 8_000, 8_000);
    write_silence(&vo.join("Outro.wav"), 8_000, 4_000);

    let config_path = dir.path().join("level.json");
    config(1).save(&config_path).unwrap();

    let level = LevelConfig::load(&config_path).unwrap();
    let registry = AssetRegistry::load(&assets).unwrap();
    let report = run_level(&level, &registry, &SimulationOptions::default()).unwrap();

    assert!(!report.stalled);
    assert_eq!(report.game_over_at_ms, Some(2_000));
    assert_eq!(report.elapsed_ms, 2_500);
}
