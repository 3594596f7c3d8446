//! Fake peripherals for device tests
#![allow(dead_code)]

use std::sync::Once;
use touchplay_device::{Device, DeviceConfig};
use touchplay_playback::{AudioDriver, ManualClock, PlaybackError};
use touchplay_touch::{TouchError, TouchSensor, PIN_COUNT};

static INIT: Once = Once::new();

/// Initialize logging once per test binary
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Touch board whose electrodes the test presses by hand
#[derive(Debug, Default)]
pub struct FakeBoard {
    pub touched: [bool; PIN_COUNT],
    pub changed: bool,
    pub present: bool,
    pub thresholds: Option<(u8, u8)>,
    pub registers: Vec<(u8, u8)>,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            present: true,
            ..Default::default()
        }
    }
}

impl TouchSensor for FakeBoard {
    fn begin(&mut self) -> touchplay_touch::Result<()> {
        if self.present {
            Ok(())
        } else {
            Err(TouchError::Init("not found at 0x5A".to_string()))
        }
    }

    fn has_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn refresh(&mut self) {}

    fn is_touched(&mut self, pin: u8) -> bool {
        self.touched[pin as usize]
    }

    fn set_touch_threshold(&mut self, threshold: u8) {
        let release = self.thresholds.map_or(0, |(_, r)| r);
        self.thresholds = Some((threshold, release));
    }

    fn set_release_threshold(&mut self, threshold: u8) {
        let touch = self.thresholds.map_or(0, |(t, _)| t);
        self.thresholds = Some((touch, threshold));
    }

    fn refresh_all(&mut self) {}

    fn baseline(&mut self, _pin: u8) -> u16 {
        0
    }

    fn filtered(&mut self, _pin: u8) -> u16 {
        0
    }

    fn write_register(&mut self, register: u8, value: u8) {
        self.registers.push((register, value));
    }
}

/// Decoder that remembers what it was told to play
#[derive(Debug, Default)]
pub struct FakeDecoder {
    pub present: bool,
    pub loaded: Option<u16>,
    pub paused: bool,
    pub plays: Vec<u16>,
    pub volume_code: Option<u8>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self {
            present: true,
            ..Default::default()
        }
    }
}

impl AudioDriver for FakeDecoder {
    fn begin(&mut self) -> touchplay_playback::Result<()> {
        if self.present {
            Ok(())
        } else {
            Err(PlaybackError::DriverInit(2))
        }
    }

    fn play(&mut self, track: u16) {
        self.plays.push(track);
        self.loaded = Some(track);
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = self.loaded.is_some();
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn stop(&mut self) {
        self.loaded = None;
        self.paused = false;
    }

    fn is_playing(&mut self) -> bool {
        self.loaded.is_some()
    }

    fn position_ms(&mut self) -> u32 {
        0
    }

    fn seek(&mut self, _position_ms: u32) {}

    fn set_volume(&mut self, code: u8) {
        self.volume_code = Some(code);
    }
}

pub type TestDevice = Device<FakeBoard, FakeDecoder, ManualClock>;

/// Device on fake peripherals, with a handle on its clock
pub fn device(config: &DeviceConfig) -> (TestDevice, ManualClock) {
    init_tracing();
    let clock = ManualClock::new(0);
    let device = Device::new(FakeBoard::new(), FakeDecoder::new(), clock.clone(), config);
    (device, clock)
}

/// Set which pins are touched and flag the change
pub fn press(device: &mut TestDevice, pins: &[u8]) {
    let board = device.touch_mut().sensor_mut();
    board.touched = [false; PIN_COUNT];
    for &pin in pins {
        board.touched[pin as usize] = true;
    }
    board.changed = true;
}

/// Config with no start delay, so touches act immediately
pub fn instant_config() -> DeviceConfig {
    let mut config = DeviceConfig::default();
    config.playback.start_delay_ms = 0;
    config
}
