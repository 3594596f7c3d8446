/// Device configuration
use crate::error::{DeviceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use touchplay_playback::PlaybackConfig;
use touchplay_touch::{TouchConfig, PIN_COUNT};

/// Environment variable prefix, e.g. `TOUCHPLAY_PLAYBACK__FADE_IN_MS=500`
pub const ENV_PREFIX: &str = "TOUCHPLAY";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeviceConfig {
    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_touch")]
    pub touch: TouchSettings,

    #[serde(default = "default_controls")]
    pub controls: ControlSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub volume: u8,

    #[serde(default)]
    pub fade_in_ms: u32,

    #[serde(default)]
    pub fade_out_ms: u32,

    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u32,

    /// Negative disables restart-after-idle
    #[serde(default = "default_idle_restart_secs")]
    pub idle_restart_secs: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TouchSettings {
    #[serde(default = "default_touch_threshold")]
    pub touch_threshold: i32,

    #[serde(default = "default_release_threshold")]
    pub release_threshold: i32,

    #[serde(default = "default_proximity_multiplier")]
    pub proximity_multiplier: f32,

    #[serde(default)]
    pub proximity_sensing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlSettings {
    /// Track played by pin 0; pin `n` plays `first_track + n`
    #[serde(default)]
    pub first_track: u16,

    #[serde(default)]
    pub release_action: ReleaseAction,
}

/// What lifting a finger off the active pin does
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseAction {
    /// Keep playing
    #[default]
    Ignore,

    /// Pause the track belonging to the released pin
    Pause,

    /// Stop the track belonging to the released pin
    Stop,
}

impl DeviceConfig {
    /// Load configuration from an optional TOML file and the environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    /// Same as [`Self::load`] with a custom environment prefix
    pub fn load_with_env_prefix(path: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = config::Config::builder();

        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            settings = settings.add_source(config::File::from(path));
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
        }

        // Nested keys use a double underscore so field names keep theirs
        settings = settings.add_source(
            config::Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings
            .build()
            .map_err(|e| DeviceError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DeviceError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.volume > 100 {
            return Err(DeviceError::Config(format!(
                "playback.volume must be 0-100, got {}",
                self.playback.volume
            )));
        }

        if !self.touch.proximity_multiplier.is_finite() || self.touch.proximity_multiplier < 0.0 {
            return Err(DeviceError::Config(
                "touch.proximity_multiplier must be a non-negative number".to_string(),
            ));
        }

        let last_pin = (PIN_COUNT - 1) as u16;
        if self.controls.first_track.checked_add(last_pin).is_none() {
            return Err(DeviceError::Config(format!(
                "controls.first_track {} leaves no room for {} pins",
                self.controls.first_track, PIN_COUNT
            )));
        }

        Ok(())
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            volume: self.playback.volume,
            fade_in_ms: self.playback.fade_in_ms,
            fade_out_ms: self.playback.fade_out_ms,
            start_delay_ms: self.playback.start_delay_ms,
            idle_restart_ms: u32::try_from(self.playback.idle_restart_secs)
                .ok()
                .map(|secs| secs.saturating_mul(1000)),
        }
    }

    pub fn touch_config(&self) -> TouchConfig {
        TouchConfig {
            touch_threshold: self.touch.touch_threshold,
            release_threshold: self.touch.release_threshold,
            proximity_multiplier: self.touch.proximity_multiplier,
            proximity_sensing: self.touch.proximity_sensing,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            playback: default_playback(),
            touch: default_touch(),
            controls: default_controls(),
        }
    }
}

// Default value functions
fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        volume: default_volume(),
        fade_in_ms: 0,
        fade_out_ms: 0,
        start_delay_ms: default_start_delay_ms(),
        idle_restart_secs: default_idle_restart_secs(),
    }
}

fn default_touch() -> TouchSettings {
    TouchSettings {
        touch_threshold: default_touch_threshold(),
        release_threshold: default_release_threshold(),
        proximity_multiplier: default_proximity_multiplier(),
        proximity_sensing: false,
    }
}

fn default_controls() -> ControlSettings {
    ControlSettings {
        first_track: 0,
        release_action: ReleaseAction::Ignore,
    }
}

fn default_volume() -> u8 {
    PlaybackConfig::default().volume
}

fn default_start_delay_ms() -> u32 {
    PlaybackConfig::default().start_delay_ms
}

fn default_idle_restart_secs() -> i32 {
    -1
}

fn default_touch_threshold() -> i32 {
    TouchConfig::default().touch_threshold
}

fn default_release_threshold() -> i32 {
    TouchConfig::default().release_threshold
}

fn default_proximity_multiplier() -> f32 {
    TouchConfig::default().proximity_multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_configs() {
        let config = DeviceConfig::default();
        assert_eq!(config.playback_config(), PlaybackConfig::default());
        assert_eq!(config.touch_config(), TouchConfig::default());
        assert_eq!(config.controls.release_action, ReleaseAction::Ignore);
    }

    #[test]
    fn idle_restart_converts_to_ms() {
        let mut config = DeviceConfig::default();
        config.playback.idle_restart_secs = 90;
        assert_eq!(config.playback_config().idle_restart_ms, Some(90_000));

        config.playback.idle_restart_secs = 0;
        assert_eq!(config.playback_config().idle_restart_ms, Some(0));
    }

    #[test]
    fn validate_rejects_loud_volume() {
        let mut config = DeviceConfig::default();
        config.playback.volume = 101;
        assert!(matches!(config.validate(), Err(DeviceError::Config(_))));
    }

    #[test]
    fn validate_rejects_track_overflow() {
        let mut config = DeviceConfig::default();
        config.controls.first_track = u16::MAX - 5;
        assert!(config.validate().is_err());

        config.controls.first_track = u16::MAX - 11;
        assert!(config.validate().is_ok());
    }
}
