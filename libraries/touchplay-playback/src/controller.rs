//! Playback state machine
//!
//! [`PlaybackController`] owns the player state, the volume model and every
//! timer. Commands take effect immediately; anything time-based (delayed
//! start, fades, reaching volume zero) happens in [`PlaybackController::tick`],
//! which the host calls once per poll whether or not a command was issued.

use embedded_hal::delay::DelayNs;

use crate::clock::{elapsed_ms, Clock};
use crate::driver::AudioDriver;
use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::fade::{fade_in_level, fade_out_level, FadeDirection};
use crate::types::{PlaybackConfig, PlaybackState};
use crate::volume::{percent_to_device_code, VolumeModel};

/// Decoder settle time after starting a track, before it honours a seek
const SEEK_SETTLE_BEFORE_MS: u32 = 1000;

/// Decoder settle time after a seek, before its position is meaningful
const SEEK_SETTLE_AFTER_MS: u32 = 100;

/// Central playback control
///
/// Orchestrates:
/// - Player state (stopped, playing, paused, waiting to start)
/// - Requested vs applied volume and the fade ramps between them
/// - Delayed start of queued tracks
/// - Restarting instead of resuming after a long idle period
pub struct PlaybackController<A, C> {
    driver: A,
    clock: C,

    // State
    state: PlaybackState,
    last_track: Option<u16>,
    pending_track: Option<u16>,

    // Volume
    volume: VolumeModel,

    // Timers
    last_start_ms: Option<u32>,
    last_stop_ms: Option<u32>,
    last_action_ms: Option<u32>,
    queued_at_ms: Option<u32>,
    start_delay_ms: u32,
    idle_restart_ms: Option<u32>,

    // Event queue for host feedback
    pending_events: Vec<PlaybackEvent>,
}

impl<A: AudioDriver, C: Clock> PlaybackController<A, C> {
    /// Create new playback controller
    ///
    /// Nothing is written to the decoder until [`Self::begin`] or the first
    /// command.
    pub fn new(driver: A, clock: C, config: PlaybackConfig) -> Self {
        let mut volume = VolumeModel::new(config.volume);
        volume.fade_in_ms = config.fade_in_ms;
        volume.fade_out_ms = config.fade_out_ms;

        Self {
            driver,
            clock,
            state: PlaybackState::Stopped,
            last_track: None,
            pending_track: None,
            volume,
            last_start_ms: None,
            last_stop_ms: None,
            last_action_ms: None,
            queued_at_ms: None,
            start_delay_ms: config.start_delay_ms,
            idle_restart_ms: config.idle_restart_ms,
            pending_events: Vec::new(),
        }
    }

    /// Initialize the decoder and apply the configured volume
    ///
    /// The volume is applied even if initialization reports an error, so a
    /// decoder that comes up late still starts at the right level.
    pub fn begin(&mut self) -> Result<()> {
        let result = self.driver.begin();
        self.set_actual_volume(self.volume.target);
        result
    }

    // ===== Playback Control =====

    /// Start a track from the beginning
    ///
    /// Stops whatever is playing first; a pending queued track is discarded.
    pub fn start_track(&mut self, track: u16) {
        tracing::info!(track, "start track");

        if self.volume.fade_in_ms > 0 {
            self.set_actual_volume(0);
            self.volume.this_fade_in_ms = self.volume.fade_in_ms;
        } else {
            self.set_actual_volume(self.volume.target);
        }

        if self.driver.is_playing() {
            self.driver.stop();
        }
        self.driver.play(track);

        let now = self.clock.now_ms();
        self.last_track = Some(track);
        self.pending_track = None;
        self.queued_at_ms = None;
        self.last_start_ms = Some(now);
        self.last_stop_ms = None;
        self.last_action_ms = Some(now);

        self.set_state(PlaybackState::Playing);
        self.pending_events.push(PlaybackEvent::TrackStarted { track });
    }

    /// Start a track, then seek into it
    ///
    /// Blocks for the decoder's settle time on either side of the seek. If the
    /// track has already ended once the seek settles, it is stopped.
    pub fn start_track_at<D: DelayNs>(&mut self, track: u16, position_ms: u32, delay: &mut D) {
        self.start_track(track);
        if position_ms == 0 {
            return;
        }

        tracing::info!(track, position_ms, "seek into track");
        delay.delay_ms(SEEK_SETTLE_BEFORE_MS);
        self.driver.seek(position_ms);
        delay.delay_ms(SEEK_SETTLE_AFTER_MS);

        if !self.driver.is_playing() {
            self.stop();
            return;
        }

        // The ramp starts once audio is actually at the requested position
        let now = self.clock.now_ms();
        self.last_start_ms = Some(now);
        self.last_action_ms = Some(now);
    }

    /// Queue a track to start after the configured start delay
    pub fn queue_with_delay(&mut self, track: u16) {
        tracing::info!(track, delay_ms = self.start_delay_ms, "queue track");

        if self.driver.is_playing() {
            self.driver.stop();
        }

        let now = self.clock.now_ms();
        self.pending_track = Some(track);
        self.queued_at_ms = Some(now);
        self.last_start_ms = None;
        self.last_stop_ms = None;
        self.last_action_ms = Some(now);

        self.set_state(PlaybackState::Waiting);
    }

    /// Pause the current track
    ///
    /// With a fade-out configured the hardware pause is deferred until the
    /// volume reaches zero. Does nothing unless playing.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            tracing::debug!(state = ?self.state, "pause ignored");
            return;
        }
        tracing::info!(track = ?self.last_track, "pause track");

        if self.volume.fade_out_ms == 0 {
            self.driver.pause();
        } else {
            self.begin_fade_out();
            if self.volume.actual == 0 {
                self.driver.pause();
            }
        }

        self.last_action_ms = Some(self.clock.now_ms());
        self.set_state(PlaybackState::Paused);
    }

    /// Resume the paused track
    ///
    /// - Nothing played yet: starts track 0
    /// - Stopped: replays the last track
    /// - Waiting: starts the queued track now
    /// - Paused past the idle-restart threshold: restarts the track
    pub fn resume(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                tracing::debug!("resume ignored, already playing");
            }
            PlaybackState::Waiting => {
                let track = self.pending_track.or(self.last_track).unwrap_or(0);
                self.start_track(track);
            }
            PlaybackState::Stopped => {
                self.start_track(self.last_track.unwrap_or(0));
            }
            PlaybackState::Paused => {
                let Some(track) = self.last_track else {
                    self.start_track(0);
                    return;
                };

                let now = self.clock.now_ms();
                if let (Some(threshold), Some(last_action)) =
                    (self.idle_restart_ms, self.last_action_ms)
                {
                    if elapsed_ms(now, last_action) >= threshold {
                        tracing::info!(track, threshold, "idle too long, restarting track");
                        self.start_track(track);
                        return;
                    }
                }

                tracing::info!(track, "resume track");
                self.driver.resume();
                self.set_state(PlaybackState::Playing);

                self.volume.this_fade_in_ms = self.volume.fade_duration(FadeDirection::In);
                if self.volume.fade_in_ms == 0 {
                    // Undo any fade-out that ran before the pause
                    self.set_actual_volume(self.volume.target);
                }

                self.last_start_ms = Some(now);
                self.last_stop_ms = None;
                self.last_action_ms = Some(now);
            }
        }
    }

    /// Stop playback and forget the current track
    ///
    /// With a fade-out configured the hardware stop is deferred until the
    /// volume reaches zero. A queued track is discarded.
    pub fn stop(&mut self) {
        tracing::info!(track = ?self.last_track, "stop track");

        self.last_track = None;
        self.pending_track = None;
        self.queued_at_ms = None;

        if self.volume.fade_out_ms > 0 && self.state != PlaybackState::Waiting {
            self.begin_fade_out();
            if self.volume.actual == 0 {
                self.driver.stop();
            }
        } else {
            self.driver.stop();
        }

        self.last_action_ms = Some(self.clock.now_ms());
        self.set_state(PlaybackState::Stopped);
    }

    fn begin_fade_out(&mut self) {
        self.volume.this_fade_out_ms = self.volume.fade_duration(FadeDirection::Out);
        self.last_stop_ms = Some(self.clock.now_ms());
        self.last_start_ms = None;
    }

    // ===== Status =====

    /// Current state, noticing a track that ended on its own
    ///
    /// If the decoder stopped while the state says playing or paused, the
    /// state drops to stopped exactly once.
    pub fn player_status(&mut self) -> PlaybackState {
        if matches!(self.state, PlaybackState::Playing | PlaybackState::Paused)
            && !self.driver.is_playing()
        {
            tracing::info!(track = ?self.last_track, "player finished track");
            self.pending_events.push(PlaybackEvent::TrackFinished {
                track: self.last_track,
            });
            self.last_start_ms = None;
            self.set_state(PlaybackState::Stopped);
        }
        self.state
    }

    /// State as last recorded, without asking the decoder
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Track most recently started, `None` after a stop
    pub fn last_track_played(&self) -> Option<u16> {
        self.last_track
    }

    /// Track waiting for the start delay
    pub fn pending_track(&self) -> Option<u16> {
        self.pending_track
    }

    /// Decoder position while a track is loaded, otherwise 0
    pub fn current_position_ms(&mut self) -> u32 {
        match self.player_status() {
            PlaybackState::Playing | PlaybackState::Paused => self.driver.position_ms(),
            PlaybackState::Stopped | PlaybackState::Waiting => 0,
        }
    }

    // ===== Timed Work =====

    /// Advance time-based behaviour; call once per poll
    ///
    /// Starts a queued track once its delay has elapsed, then steps any
    /// active fade.
    pub fn tick(&mut self) {
        self.start_if_delay_elapsed();
        self.tick_fade();
    }

    fn start_if_delay_elapsed(&mut self) {
        if self.state != PlaybackState::Waiting {
            return;
        }
        let (Some(track), Some(queued_at)) = (self.pending_track, self.queued_at_ms) else {
            return;
        };

        if elapsed_ms(self.clock.now_ms(), queued_at) < self.start_delay_ms {
            return;
        }

        tracing::info!(delay_ms = self.start_delay_ms, "start delay elapsed");
        self.start_track(track);
    }

    /// Step whichever fade is active
    ///
    /// Fade-in needs `Playing`, fade-out needs `Stopped`/`Paused`, so at most
    /// one ever applies. The volume only ever moves toward the fade's goal.
    pub fn tick_fade(&mut self) {
        let now = self.clock.now_ms();

        match (self.state, self.last_start_ms, self.last_stop_ms) {
            (PlaybackState::Playing, Some(start), _)
                if self.volume.fade_in_ms != 0 && self.volume.actual < self.volume.target =>
            {
                let level = fade_in_level(
                    self.volume.target,
                    elapsed_ms(now, start),
                    self.volume.fade_in_ms,
                    self.volume.this_fade_in_ms,
                );
                // Rounding of a partial fade can land a step behind
                if level <= self.volume.actual {
                    return;
                }

                self.set_actual_volume(level);
                if level >= self.volume.target {
                    tracing::debug!("fade-in done");
                    self.pending_events.push(PlaybackEvent::FadeCompleted {
                        direction: FadeDirection::In,
                    });
                }
            }
            (PlaybackState::Stopped | PlaybackState::Paused, _, Some(stop))
                if self.volume.fade_out_ms != 0 && self.volume.actual > 0 =>
            {
                let level = fade_out_level(
                    self.volume.target,
                    elapsed_ms(now, stop),
                    self.volume.fade_out_ms,
                    self.volume.this_fade_out_ms,
                );
                if level >= self.volume.actual {
                    return;
                }

                if level == 0 {
                    if self.state == PlaybackState::Paused {
                        self.driver.pause();
                        tracing::info!(track = ?self.last_track, "fade-out done, track paused");
                    } else {
                        self.driver.stop();
                        tracing::info!("fade-out done, track stopped");
                    }
                    self.pending_events.push(PlaybackEvent::FadeCompleted {
                        direction: FadeDirection::Out,
                    });
                }
                self.set_actual_volume(level);
            }
            _ => {}
        }
    }

    // ===== Volume & Settings =====

    /// Set the steady-state volume (clamped to 0-100), applied immediately
    pub fn set_volume(&mut self, percent: i32) {
        let percent = percent.clamp(0, 100) as u8;
        tracing::info!(percent, "set volume");

        self.volume.target = percent;
        self.set_actual_volume(percent);
        self.pending_events
            .push(PlaybackEvent::VolumeChanged { percent });
    }

    fn set_actual_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        let code = percent_to_device_code(i32::from(percent));
        tracing::debug!(percent, code, "apply volume");

        self.driver.set_volume(code);
        self.volume.actual = percent;
    }

    pub fn volume(&self) -> &VolumeModel {
        &self.volume
    }

    /// Fade-in duration in ms, 0 disables
    pub fn set_fade_in_ms(&mut self, ms: u32) {
        self.volume.fade_in_ms = ms;
    }

    /// Fade-out duration in ms, 0 disables
    pub fn set_fade_out_ms(&mut self, ms: u32) {
        self.volume.fade_out_ms = ms;
    }

    pub fn set_start_delay_ms(&mut self, ms: u32) {
        self.start_delay_ms = ms;
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.start_delay_ms
    }

    /// Inactivity after which resume restarts the track, `None` disables
    pub fn set_idle_restart(&mut self, threshold_ms: Option<u32>) {
        self.idle_restart_ms = threshold_ms;
    }

    /// Idle restart threshold in seconds, negative disables
    pub fn set_idle_restart_secs(&mut self, seconds: i32) {
        tracing::info!(seconds, "idle restart threshold");
        self.idle_restart_ms = u32::try_from(seconds)
            .ok()
            .map(|s| s.saturating_mul(1000));
    }

    pub fn idle_restart_ms(&self) -> Option<u32> {
        self.idle_restart_ms
    }

    // ===== Events =====

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events.push(PlaybackEvent::StateChanged { state });
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Driver Access =====

    pub fn driver(&self) -> &A {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut A {
        &mut self.driver
    }
}
