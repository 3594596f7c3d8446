//! Configuration loading tests

use std::fs;
use tempfile::TempDir;
use touchplay_device::{DeviceConfig, DeviceError, ReleaseAction};

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("touchplay.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = DeviceConfig::load(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, DeviceConfig::default());
}

#[test]
fn file_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[playback]
volume = 70
fade_in_ms = 1500
idle_restart_secs = 120

[touch]
touch_threshold = 12
release_threshold = 6

[controls]
first_track = 100
release_action = "pause"
"#,
    );

    let config = DeviceConfig::load(&path).unwrap();
    assert_eq!(config.playback.volume, 70);
    assert_eq!(config.playback.fade_in_ms, 1500);
    assert_eq!(config.playback.fade_out_ms, 0);
    assert_eq!(config.playback.start_delay_ms, 1000);
    assert_eq!(config.touch.touch_threshold, 12);
    assert_eq!(config.touch.release_threshold, 6);
    assert_eq!(config.controls.first_track, 100);
    assert_eq!(config.controls.release_action, ReleaseAction::Pause);

    let playback = config.playback_config();
    assert_eq!(playback.idle_restart_ms, Some(120_000));
}

#[test]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[playback]\nfade_out_ms = 300\n");

    // Prefix unique to this test so parallel loads are unaffected
    std::env::set_var("TPTEST_ENV_PLAYBACK__FADE_OUT_MS", "800");
    std::env::set_var("TPTEST_ENV_CONTROLS__RELEASE_ACTION", "stop");

    let config = DeviceConfig::load_with_env_prefix(&path, "TPTEST_ENV").unwrap();
    assert_eq!(config.playback.fade_out_ms, 800);
    assert_eq!(config.controls.release_action, ReleaseAction::Stop);

    std::env::remove_var("TPTEST_ENV_PLAYBACK__FADE_OUT_MS");
    std::env::remove_var("TPTEST_ENV_CONTROLS__RELEASE_ACTION");
}

#[test]
fn out_of_range_volume_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[playback]\nvolume = 150\n");

    let err = DeviceConfig::load(&path).unwrap_err();
    assert!(matches!(err, DeviceError::Config(_)));
    assert!(err.to_string().contains("playback.volume"));
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[playback\nvolume = ");

    assert!(matches!(
        DeviceConfig::load(&path),
        Err(DeviceError::Config(_))
    ));
}

#[test]
fn unknown_release_action_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[controls]\nrelease_action = \"skip\"\n");

    assert!(DeviceConfig::load(&path).is_err());
}
