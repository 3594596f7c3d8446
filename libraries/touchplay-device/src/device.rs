//! Touch-to-playback orchestration
//!
//! [`Device`] owns the touch arbiter and the playback controller and is
//! driven by calling [`Device::poll`] from the main loop. Each poll turns at
//! most one touch event into a playback command, then advances the
//! controller's timers.

use touchplay_playback::{AudioDriver, Clock, PlaybackController, PlaybackEvent, PlaybackState};
use touchplay_touch::{TouchArbiter, TouchEvent, TouchSensor};

use crate::config::{DeviceConfig, ReleaseAction};
use crate::error::Result;
use crate::led::StatusLed;

/// A touch board wired to an audio decoder
pub struct Device<S, A, C> {
    touch: TouchArbiter<S>,
    player: PlaybackController<A, C>,
    first_track: u16,
    release_action: ReleaseAction,
    led: Option<Box<dyn StatusLed>>,
    led_on: Option<bool>,
}

impl<S: TouchSensor, A: AudioDriver, C: Clock> Device<S, A, C> {
    pub fn new(sensor: S, driver: A, clock: C, config: &DeviceConfig) -> Self {
        Self {
            touch: TouchArbiter::with_config(sensor, &config.touch_config()),
            player: PlaybackController::new(driver, clock, config.playback_config()),
            first_track: config.controls.first_track,
            release_action: config.controls.release_action,
            led: None,
            led_on: None,
        }
    }

    /// Attach a status LED, written on the next poll
    pub fn set_status_led(&mut self, led: Box<dyn StatusLed>) {
        self.led = Some(led);
        self.led_on = None;
    }

    /// Bring up the touch sensor and the decoder
    ///
    /// Both are always attempted. A failure is logged and the device keeps
    /// running without that peripheral; the first error is returned so the
    /// host can signal it.
    pub fn begin(&mut self) -> Result<()> {
        let touch = self.touch.begin();
        if let Err(e) = &touch {
            tracing::error!(error = %e, "touch sensor not found, continuing without touch input");
        }

        let audio = self.player.begin();
        if let Err(e) = &audio {
            tracing::error!(error = %e, "audio decoder not found, continuing without audio");
        }

        touch?;
        audio?;
        tracing::info!("device ready");
        Ok(())
    }

    /// Run one cycle of the main loop
    ///
    /// Returns the touch event seen this cycle.
    pub fn poll(&mut self) -> TouchEvent {
        let event = self.touch.poll();

        match event {
            TouchEvent::NewTouch(pin) => self.on_touch(pin),
            TouchEvent::NewRelease(pin) => self.on_release(pin),
            TouchEvent::NoChange => {}
        }

        self.player.tick();
        self.update_led();
        event
    }

    fn update_led(&mut self) {
        let Some(led) = self.led.as_mut() else {
            return;
        };

        let on = self.player.player_status() == PlaybackState::Playing;
        if self.led_on != Some(on) {
            tracing::debug!(on, "status led");
            led.set(on);
            self.led_on = Some(on);
        }
    }

    /// Track played by a pin
    pub fn track_for_pin(&self, pin: u8) -> u16 {
        self.first_track.saturating_add(u16::from(pin))
    }

    fn on_touch(&mut self, pin: u8) {
        let track = self.track_for_pin(pin);
        let state = self.player.player_status();
        let current = self.player.last_track_played() == Some(track);

        tracing::debug!(pin, track, ?state, "touch");

        match state {
            PlaybackState::Playing if current => self.player.pause(),
            PlaybackState::Paused if current => self.player.resume(),
            _ if self.player.start_delay_ms() > 0 => self.player.queue_with_delay(track),
            _ => self.player.start_track(track),
        }
    }

    fn on_release(&mut self, pin: u8) {
        let track = self.track_for_pin(pin);
        let queued = self.player.pending_track() == Some(track);
        let current = self.player.last_track_played() == Some(track);

        tracing::debug!(pin, track, action = ?self.release_action, "release");

        match self.release_action {
            ReleaseAction::Ignore => {}
            // A track still waiting for its delay has nothing to pause
            ReleaseAction::Pause if queued => self.player.stop(),
            ReleaseAction::Pause if current => self.player.pause(),
            ReleaseAction::Stop if queued || current => self.player.stop(),
            ReleaseAction::Pause | ReleaseAction::Stop => {}
        }
    }

    /// Take all playback events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.player.drain_events()
    }

    pub fn release_action(&self) -> ReleaseAction {
        self.release_action
    }

    pub fn set_release_action(&mut self, action: ReleaseAction) {
        self.release_action = action;
    }

    pub fn touch(&self) -> &TouchArbiter<S> {
        &self.touch
    }

    pub fn touch_mut(&mut self) -> &mut TouchArbiter<S> {
        &mut self.touch
    }

    pub fn player(&self) -> &PlaybackController<A, C> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlaybackController<A, C> {
        &mut self.player
    }
}
