//! Ambient audio controller.
//!
//! Holds the play/mute/volume model for the session-wide background track.
//! The actual sound device sits behind [`AudioOutput`]; a failed play is
//! remembered and retried on the next user interaction. Volume fades are a
//! single [`Ramp`] evaluated against the caller's clock, and a new fade
//! replaces the running one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub enabled: bool,
    /// Track to loop. Loaded lazily on the first play attempt.
    pub asset_path: Option<PathBuf>,
    pub base_volume: f32,
    /// Target of the lower-volume fade.
    pub lowered_volume: f32,
    pub fade: Duration,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            asset_path: None,
            base_volume: 0.3,
            lowered_volume: 0.1,
            fade: Duration::from_millis(450),
        }
    }
}

/// A sound device capable of looping one track.
pub trait AudioOutput {
    fn load(&mut self, asset: &Path) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
}

/// Output that only records what it was told. Used when no device is wanted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilentOutput {
    pub loaded: Option<PathBuf>,
    pub playing: bool,
    pub volume: f32,
    pub muted: bool,
}

impl AudioOutput for SilentOutput {
    fn load(&mut self, asset: &Path) -> Result<()> {
        self.loaded = Some(asset.to_path_buf());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl<T: AudioOutput + ?Sized> AudioOutput for Box<T> {
    fn load(&mut self, asset: &Path) -> Result<()> {
        (**self).load(asset)
    }

    fn play(&mut self) -> Result<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }
}

/// Linear volume ramp from `from` to `to`, starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    pub from: f32,
    pub to: f32,
    pub start: Duration,
    pub duration: Duration,
}

impl Ramp {
    pub fn value_at(&self, now: Duration) -> f32 {
        if self.duration.is_zero() || now >= self.start + self.duration {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        (self.start + self.duration).saturating_sub(now)
    }
}

pub struct AudioController<O> {
    output: O,
    settings: AudioSettings,
    active: bool,
    playing: bool,
    muted: bool,
    loaded: bool,
    retry_pending: bool,
    volume: f32,
    ramp: Option<Ramp>,
}

impl<O: AudioOutput> AudioController<O> {
    pub fn new(output: O, settings: AudioSettings) -> Self {
        let volume = settings.base_volume;
        Self {
            output,
            settings,
            active: false,
            playing: false,
            muted: false,
            loaded: false,
            retry_pending: false,
            volume,
            ramp: None,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// Session started: try to begin playback.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.attempt_play();
    }

    /// Session restarted: stop playback and unmute.
    pub fn deactivate(&mut self) {
        if self.playing {
            self.output.pause();
        }
        self.active = false;
        self.playing = false;
        self.retry_pending = false;
        if self.muted {
            self.muted = false;
            self.output.set_muted(false);
        }
        debug!("Ambient audio deactivated");
    }

    /// Retries a blocked play. Safe to call on every key press.
    pub fn on_user_interaction(&mut self) {
        if self.retry_pending && self.active && !self.playing {
            debug!("Retrying ambient audio after user interaction");
            self.attempt_play();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        self.output.set_muted(muted);
        if !muted && !self.playing {
            self.attempt_play();
        }
        info!(muted, "Ambient audio mute changed");
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Fades towards the lowered volume. Replaces any running fade.
    pub fn lower_volume(&mut self, now: Duration) {
        self.start_ramp(self.settings.lowered_volume, now);
    }

    /// Fades back to the base volume. Replaces any running fade.
    pub fn restore_volume(&mut self, now: Duration) {
        self.start_ramp(self.settings.base_volume, now);
    }

    /// Applies the running fade at `now`.
    pub fn tick(&mut self, now: Duration) {
        let Some(ramp) = self.ramp else { return };
        self.volume = ramp.value_at(now);
        self.output.set_volume(self.volume);
        if ramp.is_finished(now) {
            self.ramp = None;
        }
    }

    /// How long until the running fade settles, if one is running.
    pub fn fade_remaining(&self, now: Duration) -> Option<Duration> {
        self.ramp.map(|r| r.remaining(now))
    }

    fn start_ramp(&mut self, to: f32, now: Duration) {
        self.ramp = Some(Ramp {
            from: self.volume,
            to,
            start: now,
            duration: self.settings.fade,
        });
        debug!(from = self.volume, to, "Ambient audio fade started");
    }

    fn attempt_play(&mut self) {
        if !self.settings.enabled || !self.active || self.playing {
            return;
        }
        if !self.loaded {
            let Some(asset) = self.settings.asset_path.clone() else {
                debug!("No ambient audio asset configured");
                return;
            };
            if let Err(e) = self.output.load(&asset) {
                warn!(error = %e, asset = %asset.display(), "Ambient audio failed to load");
                self.retry_pending = true;
                return;
            }
            self.loaded = true;
        }
        self.output.set_volume(self.volume);
        match self.output.play() {
            Ok(()) => {
                self.playing = true;
                self.retry_pending = false;
                info!("Ambient audio playing");
            }
            Err(e) => {
                warn!(error = %e, "Ambient audio blocked; will retry on next interaction");
                self.playing = false;
                self.retry_pending = true;
            }
        }
    }
}
